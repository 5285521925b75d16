use super::applicant::Applicant;
use super::catalog::{BenefitCatalog, BenefitRule, Category};
use serde::Serialize;

/// Verdict for one rule against one applicant snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationResult {
    pub rule: &'static BenefitRule,
    pub qualifies: bool,
}

impl EvaluationResult {
    pub fn view(&self) -> BenefitView {
        BenefitView {
            index: self.rule.index,
            name: self.rule.name,
            amount: self.rule.amount,
            qualifies: self.qualifies,
            note: self.rule.note,
            office: self.rule.office,
            category: self.rule.category,
            highlight: self.rule.highlight,
        }
    }
}

/// Flat record handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenefitView {
    pub index: u8,
    pub name: &'static str,
    pub amount: &'static str,
    pub qualifies: bool,
    pub note: &'static str,
    pub office: &'static str,
    pub category: Category,
    pub highlight: bool,
}

/// Results for one category, ascending by rule index.
#[derive(Debug, Clone)]
pub struct CategorySection<'a> {
    pub category: Category,
    pub results: Vec<&'a EvaluationResult>,
}

impl CategorySection<'_> {
    pub fn qualified(&self) -> usize {
        self.results.iter().filter(|result| result.qualifies).count()
    }

    pub fn summary(&self) -> SectionSummary {
        SectionSummary {
            category: self.category,
            label: self.category.label(),
            qualified: self.qualified(),
            total: self.results.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub category: Category,
    pub label: &'static str,
    pub qualified: usize,
    pub total: usize,
}

/// Full evaluation of one applicant snapshot against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityReport {
    applicant: Applicant,
    results: Vec<EvaluationResult>,
}

impl EligibilityReport {
    pub fn build(catalog: &BenefitCatalog, applicant: Applicant) -> Self {
        Self {
            applicant,
            results: catalog.evaluate(&applicant),
        }
    }

    pub fn applicant(&self) -> &Applicant {
        &self.applicant
    }

    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    pub fn result(&self, index: u8) -> Option<&EvaluationResult> {
        self.results.iter().find(|result| result.rule.index == index)
    }

    pub fn qualified_indices(&self) -> Vec<u8> {
        self.results
            .iter()
            .filter(|result| result.qualifies)
            .map(|result| result.rule.index)
            .collect()
    }

    pub fn qualified_count(&self) -> usize {
        self.results.iter().filter(|result| result.qualifies).count()
    }

    pub fn views(&self) -> Vec<BenefitView> {
        self.results.iter().map(EvaluationResult::view).collect()
    }

    pub fn sections(&self) -> Vec<CategorySection<'_>> {
        Category::ordered()
            .into_iter()
            .map(|category| CategorySection {
                category,
                results: self
                    .results
                    .iter()
                    .filter(|result| result.rule.category == category)
                    .collect(),
            })
            .collect()
    }
}
