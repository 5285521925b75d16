use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_AGE: u8 = 50;
pub const MAX_AGE: u8 = 120;
pub const DEFAULT_AGE: u8 = 55;

/// Rejected age input. The holder keeps its previous value when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAgeError {
    #[error("age {0} is outside the accepted range {}-{}", MIN_AGE, MAX_AGE)]
    OutOfRange(i64),
    #[error("age '{0}' is not a whole number")]
    Unparseable(String),
    #[error("age is required")]
    Missing,
}

/// Applicant age, guaranteed to lie within `MIN_AGE..=MAX_AGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    pub fn new(value: i64) -> Result<Self, InvalidAgeError> {
        if (i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidAgeError::OutOfRange(value))
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidAgeError> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidAgeError::Unparseable(raw.trim().to_string()))?;
        Self::new(value)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Age {
    fn default() -> Self {
        Self(DEFAULT_AGE)
    }
}

impl TryFrom<i64> for Age {
    type Error = InvalidAgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six yes/no facts a citizen can tick on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    FarmerInsured,
    LowIncome,
    Disability,
    Homeowner,
    Renter,
    GrandparentCaregiver,
}

impl Status {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::FarmerInsured,
            Self::LowIncome,
            Self::Disability,
            Self::Homeowner,
            Self::Renter,
            Self::GrandparentCaregiver,
        ]
    }

    /// Form field name used by the calculator page.
    pub const fn field(self) -> &'static str {
        match self {
            Self::FarmerInsured => "farmer",
            Self::LowIncome => "low_income",
            Self::Disability => "disability",
            Self::Homeowner => "owner",
            Self::Renter => "renter",
            Self::GrandparentCaregiver => "grandparenting",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::FarmerInsured => "🌱",
            Self::LowIncome => "📉",
            Self::Disability => "♿",
            Self::Homeowner => "🏠",
            Self::Renter => "🔑",
            Self::GrandparentCaregiver => "👶",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FarmerInsured => "具有農保身分",
            Self::LowIncome => "列冊中低收入戶",
            Self::Disability => "領有身障手冊",
            Self::Homeowner => "自有住宅",
            Self::Renter => "租賃房屋",
            Self::GrandparentCaregiver => "協助照顧孫子女",
        }
    }

    pub const fn negated_label(self) -> &'static str {
        match self {
            Self::FarmerInsured => "不具農保身分",
            Self::LowIncome => "非列冊中低收入戶",
            Self::Disability => "未領身障手冊",
            Self::Homeowner => "無自有住宅",
            Self::Renter => "未租賃房屋",
            Self::GrandparentCaregiver => "未照顧孫子女",
        }
    }
}

/// Immutable snapshot of the facts describing one elderly household member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Applicant {
    age: Age,
    farmer_insured: bool,
    low_income: bool,
    disability: bool,
    homeowner: bool,
    renter: bool,
    grandparent_caregiver: bool,
}

impl Applicant {
    pub fn new(age: Age) -> Self {
        Self {
            age,
            ..Self::default()
        }
    }

    /// Returns a copy with `status` ticked.
    pub fn with(mut self, status: Status) -> Self {
        self.set(status, true);
        self
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn has(&self, status: Status) -> bool {
        match status {
            Status::FarmerInsured => self.farmer_insured,
            Status::LowIncome => self.low_income,
            Status::Disability => self.disability,
            Status::Homeowner => self.homeowner,
            Status::Renter => self.renter,
            Status::GrandparentCaregiver => self.grandparent_caregiver,
        }
    }

    pub fn statuses(&self) -> Vec<Status> {
        Status::ordered()
            .into_iter()
            .filter(|status| self.has(*status))
            .collect()
    }

    fn set(&mut self, status: Status, value: bool) {
        let slot = match status {
            Status::FarmerInsured => &mut self.farmer_insured,
            Status::LowIncome => &mut self.low_income,
            Status::Disability => &mut self.disability,
            Status::Homeowner => &mut self.homeowner,
            Status::Renter => &mut self.renter,
            Status::GrandparentCaregiver => &mut self.grandparent_caregiver,
        };
        *slot = value;
    }
}

/// Mutable holder behind the calculator form.
///
/// Updates only affect later calls to [`ApplicantForm::snapshot`]; reports built from
/// earlier snapshots are never patched.
#[derive(Debug, Clone, Default)]
pub struct ApplicantForm {
    current: Applicant,
}

impl ApplicantForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age(&self) -> Age {
        self.current.age
    }

    /// Accepts `value` when it lies in `MIN_AGE..=MAX_AGE`, otherwise keeps the previous age.
    pub fn set_age(&mut self, value: i64) -> Result<Age, InvalidAgeError> {
        let age = Age::new(value)?;
        self.current.age = age;
        Ok(age)
    }

    /// Same as [`ApplicantForm::set_age`] for raw form text.
    pub fn set_age_text(&mut self, raw: &str) -> Result<Age, InvalidAgeError> {
        let age = Age::parse(raw)?;
        self.current.age = age;
        Ok(age)
    }

    pub fn set_status(&mut self, status: Status, value: bool) {
        self.current.set(status, value);
    }

    /// Sets every status at once; `ticked` follows [`Status::ordered`].
    pub fn set_statuses(&mut self, ticked: [bool; 6]) {
        for (status, value) in Status::ordered().into_iter().zip(ticked) {
            self.current.set(status, value);
        }
    }

    pub fn has(&self, status: Status) -> bool {
        self.current.has(status)
    }

    pub fn snapshot(&self) -> Applicant {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(Age::new(50).map(Age::get), Ok(50));
        assert_eq!(Age::new(120).map(Age::get), Ok(120));
        assert_eq!(Age::new(49), Err(InvalidAgeError::OutOfRange(49)));
        assert_eq!(Age::new(121), Err(InvalidAgeError::OutOfRange(121)));
        assert_eq!(Age::new(-3), Err(InvalidAgeError::OutOfRange(-3)));
    }

    #[test]
    fn parse_rejects_non_numeric_text() {
        assert_eq!(Age::parse(" 64 ").map(Age::get), Ok(64));
        assert_eq!(
            Age::parse("sixty"),
            Err(InvalidAgeError::Unparseable("sixty".to_string()))
        );
        assert!(matches!(Age::parse("65.5"), Err(InvalidAgeError::Unparseable(_))));
    }

    #[test]
    fn form_defaults_to_age_55_with_no_statuses() {
        let form = ApplicantForm::new();
        let applicant = form.snapshot();
        assert_eq!(applicant.age().get(), DEFAULT_AGE);
        assert!(applicant.statuses().is_empty());
    }

    #[test]
    fn rejected_age_retains_previous_value() {
        let mut form = ApplicantForm::new();
        form.set_age(72).expect("72 accepted");

        let err = form.set_age(121).expect_err("121 rejected");
        assert_eq!(err, InvalidAgeError::OutOfRange(121));
        assert_eq!(form.age().get(), 72);

        form.set_age_text("abc").expect_err("text rejected");
        assert_eq!(form.age().get(), 72);
    }

    #[test]
    fn snapshots_are_detached_from_later_updates() {
        let mut form = ApplicantForm::new();
        form.set_status(Status::FarmerInsured, true);
        let before = form.snapshot();

        form.set_status(Status::FarmerInsured, false);
        form.set_age(90).expect("90 accepted");

        assert!(before.has(Status::FarmerInsured));
        assert_eq!(before.age().get(), 55);
        assert!(!form.snapshot().has(Status::FarmerInsured));
    }

    #[test]
    fn set_statuses_follows_display_order() {
        let mut form = ApplicantForm::new();
        form.set_status(Status::Disability, true);
        form.set_statuses([true, false, false, true, false, true]);

        assert_eq!(
            form.snapshot().statuses(),
            vec![
                Status::FarmerInsured,
                Status::Homeowner,
                Status::GrandparentCaregiver
            ]
        );
        assert_eq!(form.age(), Age::default());
    }

    #[test]
    fn owner_and_renter_may_both_be_set() {
        let applicant = Applicant::new(Age::default())
            .with(Status::Homeowner)
            .with(Status::Renter);
        assert_eq!(applicant.statuses(), vec![Status::Homeowner, Status::Renter]);
    }

    #[test]
    fn age_serializes_as_plain_number() {
        let applicant = Applicant::new(Age::new(61).expect("valid")).with(Status::LowIncome);
        let json = serde_json::to_value(applicant).expect("serializes");
        assert_eq!(json["age"], 61);
        assert_eq!(json["low_income"], true);
        assert_eq!(json["renter"], false);

        let age: Result<Age, _> = serde_json::from_str("130");
        assert!(age.is_err());
    }
}
