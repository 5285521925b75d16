use fuxing_benefits::eligibility::contacts::DISCLAIMER;
use fuxing_benefits::eligibility::{BenefitCatalog, Category, EligibilityReport};
use std::fmt::Write;

/// Plain-text rendering of an eligibility report for the terminal.
pub(crate) fn render_eligibility(report: &EligibilityReport) -> String {
    let mut out = String::new();
    let applicant = report.applicant();
    let statuses: Vec<&str> = applicant
        .statuses()
        .into_iter()
        .map(|status| status.label())
        .collect();

    let _ = writeln!(out, "Fuxing elder benefit check");
    let _ = writeln!(out, "Age: {}", applicant.age());
    if statuses.is_empty() {
        let _ = writeln!(out, "Statuses: none");
    } else {
        let _ = writeln!(out, "Statuses: {}", statuses.join(", "));
    }
    let _ = writeln!(
        out,
        "Qualified: {}/{}",
        report.qualified_count(),
        report.results().len()
    );

    for section in report.sections() {
        let _ = writeln!(
            out,
            "\n{} {} ({}/{})",
            section.category.icon(),
            section.category.label(),
            section.qualified(),
            section.results.len()
        );
        for result in &section.results {
            let rule = result.rule;
            if result.qualifies {
                let marker = if rule.highlight { "★" } else { "✔" };
                let _ = writeln!(
                    out,
                    "  {marker} {:>2}. {} | {} | {} | {}",
                    rule.index, rule.name, rule.amount, rule.note, rule.office
                );
            } else {
                let _ = writeln!(
                    out,
                    "  🔒 {:>2}. {} (未符條件: {})",
                    rule.index, rule.name, rule.note
                );
            }
        }
    }

    let _ = writeln!(out, "\n{DISCLAIMER}");
    out
}

/// Catalog listing with the derived criteria for each rule.
pub(crate) fn render_catalog(catalog: &BenefitCatalog) -> String {
    let mut out = String::new();
    for category in Category::ordered() {
        let _ = writeln!(out, "{} {} - {}", category.icon(), category.label(), category.caption());
        for rule in catalog.rules_for_category(category) {
            let _ = writeln!(
                out,
                "  {:>2}. {} [{}] criteria: {} / office: {}",
                rule.index,
                rule.name,
                rule.amount,
                rule.condition.describe(),
                rule.office
            );
        }
    }
    out
}
