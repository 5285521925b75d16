use fuxing_benefits::eligibility::{
    evaluate, Age, Applicant, ApplicantForm, Status, MAX_AGE, MIN_AGE,
};
use proptest::prelude::*;

fn applicant_strategy() -> impl Strategy<Value = Applicant> {
    (MIN_AGE..=MAX_AGE, prop::array::uniform6(any::<bool>())).prop_map(|(age, flags)| {
        Status::ordered().into_iter().zip(flags).fold(
            Applicant::new(Age::new(i64::from(age)).expect("age within range")),
            |applicant, (status, ticked)| {
                if ticked {
                    applicant.with(status)
                } else {
                    applicant
                }
            },
        )
    })
}

fn verdict(applicant: &Applicant, index: u8) -> bool {
    evaluate(applicant)
        .iter()
        .find(|result| result.rule.index == index)
        .map(|result| result.qualifies)
        .unwrap_or(false)
}

proptest! {
    #[test]
    fn always_nineteen_results(applicant in applicant_strategy()) {
        prop_assert_eq!(evaluate(&applicant).len(), 19);
    }

    #[test]
    fn unconditional_rules_always_qualify(applicant in applicant_strategy()) {
        prop_assert!(verdict(&applicant, 5));
        prop_assert!(verdict(&applicant, 18));
    }

    #[test]
    fn exactly_one_funeral_benefit_applies(applicant in applicant_strategy()) {
        prop_assert!(verdict(&applicant, 16) ^ verdict(&applicant, 17));
    }

    #[test]
    fn pension_and_farmer_allowance_never_overlap(applicant in applicant_strategy()) {
        prop_assert!(!(verdict(&applicant, 3) && verdict(&applicant, 4)));
    }

    #[test]
    fn under_55_age_gated_rules_are_locked(
        age in MIN_AGE..55u8,
        flags in prop::array::uniform6(any::<bool>()),
    ) {
        let applicant = Status::ordered().into_iter().zip(flags).fold(
            Applicant::new(Age::new(i64::from(age)).expect("age within range")),
            |applicant, (status, ticked)| if ticked { applicant.with(status) } else { applicant },
        );
        for index in [1u8, 2, 3, 7, 8, 9, 11, 12] {
            prop_assert!(!verdict(&applicant, index), "rule {} qualified at {}", index, age);
        }
        prop_assert!(verdict(&applicant, 5));
        prop_assert!(verdict(&applicant, 18));
    }

    #[test]
    fn evaluation_is_idempotent(applicant in applicant_strategy()) {
        prop_assert_eq!(evaluate(&applicant), evaluate(&applicant));
    }

    #[test]
    fn out_of_range_ages_never_change_the_form(value in any::<i64>()) {
        let mut form = ApplicantForm::new();
        form.set_age(77).expect("77 accepted");
        let accepted = (i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(&value);

        let outcome = form.set_age(value);

        prop_assert_eq!(outcome.is_ok(), accepted);
        if accepted {
            prop_assert_eq!(i64::from(form.age().get()), value);
        } else {
            prop_assert_eq!(form.age().get(), 77);
        }
    }
}
