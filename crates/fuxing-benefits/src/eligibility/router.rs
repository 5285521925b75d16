use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::applicant::{Applicant, ApplicantForm, InvalidAgeError};
use super::catalog::{BenefitCatalog, Category};
use super::page::{self, PageContext};
use super::report::{BenefitView, EligibilityReport, SectionSummary};
use crate::error::AppError;

/// Router serving the calculator page and its JSON counterparts.
pub fn eligibility_router(catalog: BenefitCatalog) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/api/v1/eligibility", post(evaluate_handler))
        .route("/api/v1/benefits", get(catalog_handler))
        .with_state(catalog)
}

/// Query string submitted by the calculator form.
#[derive(Debug, Default, Deserialize)]
pub struct CalculatorQuery {
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub last_age: Option<String>,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub farmer: bool,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub low_income: bool,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub disability: bool,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub owner: bool,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub renter: bool,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub grandparenting: bool,
}

impl CalculatorQuery {
    /// Applies the submission to a fresh form. A rejected `age` leaves the previously
    /// accepted `last_age` (or the default) in place.
    pub fn into_form(self) -> (ApplicantForm, Option<InvalidAgeError>) {
        let mut form = ApplicantForm::new();

        if let Some(previous) = non_blank(self.last_age.as_deref()) {
            if let Err(error) = form.set_age_text(previous) {
                debug!(%error, "ignored unusable last_age");
            }
        }
        let age_error = non_blank(self.age.as_deref()).and_then(|raw| form.set_age_text(raw).err());

        form.set_statuses([
            self.farmer,
            self.low_income,
            self.disability,
            self.owner,
            self.renter,
            self.grandparenting,
        ]);

        (form, age_error)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// A submitted checkbox counts as ticked unless it carries an explicit "off" value.
pub(crate) fn parse_checkbox(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "off" | "false" | "0" | "no"
    )
}

fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_checkbox(&raw))
}

pub(crate) async fn page_handler(
    State(catalog): State<BenefitCatalog>,
    Query(query): Query<CalculatorQuery>,
) -> Html<String> {
    let (form, age_error) = query.into_form();
    if let Some(error) = &age_error {
        warn!(%error, retained = %form.age(), "rejected age input");
    }

    let report = EligibilityReport::build(&catalog, form.snapshot());
    debug!(qualified = report.qualified_count(), "rendered calculator page");

    let context = PageContext::new(&report).with_age_error(age_error.as_ref());
    Html(page::render(&context))
}

/// JSON body of `POST /api/v1/eligibility`. `age` stays loosely typed so that a bad
/// value surfaces as [`InvalidAgeError`] rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EligibilityRequest {
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub farmer_insured: bool,
    #[serde(default)]
    pub low_income: bool,
    #[serde(default)]
    pub disability: bool,
    #[serde(default)]
    pub homeowner: bool,
    #[serde(default)]
    pub renter: bool,
    #[serde(default)]
    pub grandparent_caregiver: bool,
}

impl EligibilityRequest {
    pub fn applicant(&self) -> Result<Applicant, InvalidAgeError> {
        let mut form = ApplicantForm::new();
        form.set_age(json_age(self.age.as_ref())?)?;
        form.set_statuses([
            self.farmer_insured,
            self.low_income,
            self.disability,
            self.homeowner,
            self.renter,
            self.grandparent_caregiver,
        ]);
        Ok(form.snapshot())
    }
}

/// Whole numbers and numeric strings are accepted; everything else is unparseable.
fn json_age(value: Option<&Value>) -> Result<i64, InvalidAgeError> {
    match value {
        None | Some(Value::Null) => Err(InvalidAgeError::Missing),
        Some(Value::Number(number)) => number
            .as_i64()
            .ok_or_else(|| InvalidAgeError::Unparseable(number.to_string())),
        Some(Value::String(raw)) => raw
            .trim()
            .parse()
            .map_err(|_| InvalidAgeError::Unparseable(raw.trim().to_string())),
        Some(other) => Err(InvalidAgeError::Unparseable(other.to_string())),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EligibilityResponse {
    pub applicant: Applicant,
    pub qualified_count: usize,
    pub benefits: Vec<BenefitView>,
    pub sections: Vec<SectionSummary>,
}

impl EligibilityResponse {
    pub fn from_report(report: &EligibilityReport) -> Self {
        Self {
            applicant: *report.applicant(),
            qualified_count: report.qualified_count(),
            benefits: report.views(),
            sections: report
                .sections()
                .iter()
                .map(|section| section.summary())
                .collect(),
        }
    }
}

pub(crate) async fn evaluate_handler(
    State(catalog): State<BenefitCatalog>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let Json(request) = payload.inspect_err(|rejection| {
        warn!(status = %rejection.status(), "rejected eligibility request body");
    })?;
    let applicant = request.applicant()?;
    let report = EligibilityReport::build(&catalog, applicant);
    debug!(
        age = %applicant.age(),
        qualified = report.qualified_count(),
        "evaluated eligibility request"
    );
    Ok(Json(EligibilityResponse::from_report(&report)))
}

/// Catalog entry including the rendered criteria text.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub index: u8,
    pub name: &'static str,
    pub amount: &'static str,
    pub note: &'static str,
    pub office: &'static str,
    pub category: Category,
    pub highlight: bool,
    pub criteria: String,
}

pub fn catalog_entries(catalog: &BenefitCatalog) -> Vec<CatalogEntry> {
    catalog
        .rules()
        .iter()
        .map(|rule| CatalogEntry {
            index: rule.index,
            name: rule.name,
            amount: rule.amount,
            note: rule.note,
            office: rule.office,
            category: rule.category,
            highlight: rule.highlight,
            criteria: rule.condition.describe(),
        })
        .collect()
}

pub(crate) async fn catalog_handler(
    State(catalog): State<BenefitCatalog>,
) -> Json<Vec<CatalogEntry>> {
    Json(catalog_entries(&catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::{Age, Status};
    use axum::http::Uri;

    #[test]
    fn checkbox_values_follow_html_conventions() {
        assert!(parse_checkbox("on"));
        assert!(parse_checkbox("TRUE"));
        assert!(!parse_checkbox("0"));
        assert!(!parse_checkbox(""));
        assert!(!parse_checkbox(" Off "));
        assert!(parse_checkbox("maybe"));
        assert!(parse_checkbox("yes!"));
    }

    #[test]
    fn unexpected_checkbox_value_still_ticks_the_box() {
        let uri: Uri = "/?age=70&farmer=yes%21&renter=no".parse().expect("valid uri");
        let Query(query) = Query::<CalculatorQuery>::try_from_uri(&uri).expect("query parses");
        let (form, error) = query.into_form();
        assert!(error.is_none());
        assert!(form.has(Status::FarmerInsured));
        assert!(!form.has(Status::Renter));
    }

    #[test]
    fn invalid_age_falls_back_to_last_accepted_age() {
        let query = CalculatorQuery {
            age: Some("130".to_string()),
            last_age: Some("68".to_string()),
            farmer: true,
            ..CalculatorQuery::default()
        };

        let (form, error) = query.into_form();
        assert_eq!(error, Some(InvalidAgeError::OutOfRange(130)));
        assert_eq!(form.age().get(), 68);
        assert!(form.has(Status::FarmerInsured));
    }

    #[test]
    fn missing_age_uses_default() {
        let (form, error) = CalculatorQuery::default().into_form();
        assert!(error.is_none());
        assert_eq!(form.age(), Age::default());
    }

    #[test]
    fn corrupted_last_age_is_ignored() {
        let query = CalculatorQuery {
            age: Some("abc".to_string()),
            last_age: Some("999".to_string()),
            ..CalculatorQuery::default()
        };
        let (form, error) = query.into_form();
        assert!(matches!(error, Some(InvalidAgeError::Unparseable(_))));
        assert_eq!(form.age(), Age::default());
    }

    #[test]
    fn request_maps_flags_onto_applicant() {
        let request = EligibilityRequest {
            age: Some(Value::from(70)),
            farmer_insured: true,
            disability: true,
            ..EligibilityRequest::default()
        };
        let applicant = request.applicant().expect("valid request");
        assert_eq!(
            applicant.statuses(),
            vec![Status::FarmerInsured, Status::Disability]
        );
    }

    #[test]
    fn request_age_must_be_a_whole_number() {
        let age_of = |body: &str| {
            serde_json::from_str::<EligibilityRequest>(body)
                .expect("body parses")
                .applicant()
                .map(|applicant| applicant.age().get())
        };

        assert_eq!(age_of(r#"{"age": 70}"#), Ok(70));
        assert_eq!(age_of(r#"{"age": " 70 "}"#), Ok(70));
        assert_eq!(age_of("{}"), Err(InvalidAgeError::Missing));
        assert_eq!(age_of(r#"{"age": null}"#), Err(InvalidAgeError::Missing));
        assert!(matches!(age_of(r#"{"age": 60.5}"#), Err(InvalidAgeError::Unparseable(_))));
        assert!(matches!(age_of(r#"{"age": true}"#), Err(InvalidAgeError::Unparseable(_))));
        assert!(matches!(
            age_of(r#"{"age": 99999999999999999999}"#),
            Err(InvalidAgeError::Unparseable(_))
        ));
        assert_eq!(age_of(r#"{"age": "121"}"#), Err(InvalidAgeError::OutOfRange(121)));
    }

    #[test]
    fn catalog_entries_carry_criteria() {
        let entries = catalog_entries(&BenefitCatalog::standard());
        assert_eq!(entries.len(), 19);
        assert_eq!(entries[5].criteria, "協助照顧孫子女 且 列冊中低收入戶");
        assert!(entries[10].highlight);
    }
}
