mod applicant;
mod catalog;
pub mod contacts;
pub mod page;
mod report;
pub mod router;

pub use applicant::{
    Age, Applicant, ApplicantForm, InvalidAgeError, Status, DEFAULT_AGE, MAX_AGE, MIN_AGE,
};
pub use catalog::{BenefitCatalog, BenefitRule, Category, Condition, BENEFIT_RULES};
pub use report::{
    BenefitView, CategorySection, EligibilityReport, EvaluationResult, SectionSummary,
};

impl BenefitCatalog {
    /// Applies every rule to the snapshot, one verdict per rule in table order.
    pub fn evaluate(&self, applicant: &Applicant) -> Vec<EvaluationResult> {
        self.rules()
            .iter()
            .map(|rule| EvaluationResult {
                rule,
                qualifies: rule.applies_to(applicant),
            })
            .collect()
    }
}

/// Evaluates the standard 19-rule catalog.
pub fn evaluate(applicant: &Applicant) -> Vec<EvaluationResult> {
    BenefitCatalog::standard().evaluate(applicant)
}
