//! Server-side rendering of the calculator page.
//!
//! The page is a plain HTML form submitted with `GET /`; results are grouped into the
//! four category sections, qualified benefits as cards and the rest as collapsed
//! locked notes. No script is emitted.

use super::applicant::{InvalidAgeError, Status, MAX_AGE, MIN_AGE};
use super::catalog::Category;
use super::contacts::{contacts_in, ContactGroup, DISCLAIMER};
use super::report::{CategorySection, EligibilityReport, EvaluationResult};

pub const PAGE_TITLE: &str = "復興區長者福利試算系統";

const STYLE: &str = r#"
body { margin: 0; background-color: #f8f9fa; font-family: "Microsoft JhengHei", sans-serif; color: #212529; }
main { max-width: 760px; margin: 0 auto; padding: 16px; }
.header-box { background: linear-gradient(135deg, #2E8B57 0%, #3CB371 100%); padding: 20px; border-radius: 15px; color: white; text-align: center; margin-bottom: 25px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
.header-title { font-size: 28px; font-weight: bold; margin: 0; }
.header-subtitle { font-size: 18px; opacity: 0.9; margin-top: 5px; }
.input-box { background: white; border: 1px solid #dee2e6; border-radius: 10px; padding: 16px; margin-bottom: 25px; }
.input-row { display: flex; gap: 16px; flex-wrap: wrap; align-items: center; }
.info { background: #e7f1ff; color: #084298; padding: 8px 12px; border-radius: 8px; }
.error { background: #f8d7da; color: #842029; padding: 8px 12px; border-radius: 8px; margin-bottom: 12px; }
.checks { display: grid; grid-template-columns: 1fr 1fr; gap: 8px; margin: 12px 0; }
nav.tabs { display: flex; gap: 8px; flex-wrap: wrap; margin-bottom: 12px; }
nav.tabs a { padding: 6px 12px; border-radius: 8px; background: white; border: 1px solid #dee2e6; text-decoration: none; color: #2E8B57; }
.caption { font-size: 14px; color: #6c757d; }
.benefit-card { background-color: white; border-left: 5px solid #2E8B57; padding: 15px; margin-bottom: 12px; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.benefit-card.highlight { background-color: #fffbea; border-left-color: #FFD700; }
.card-head { display: flex; justify-content: space-between; align-items: center; }
.card-title { font-weight: bold; font-size: 18px; }
.money-tag { color: #d63384; font-size: 22px; font-weight: 900; }
.location-tag { font-size: 14px; color: #666; background-color: #f1f3f5; padding: 2px 8px; border-radius: 10px; }
.card-note { margin-top: 8px; font-size: 15px; color: #555; }
details.locked { background: white; border: 1px solid #dee2e6; border-radius: 8px; padding: 8px 12px; margin-bottom: 8px; color: #6c757d; }
footer { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; border-top: 1px solid #dee2e6; margin-top: 24px; padding-top: 12px; }
.disclaimer { text-align: center; margin-top: 30px; color: #888; font-size: 12px; }
"#;

/// Everything the page needs beyond the report itself.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub report: &'a EligibilityReport,
    pub age_error: Option<&'a InvalidAgeError>,
}

impl<'a> PageContext<'a> {
    pub fn new(report: &'a EligibilityReport) -> Self {
        Self {
            report,
            age_error: None,
        }
    }

    pub fn with_age_error(mut self, error: Option<&'a InvalidAgeError>) -> Self {
        self.age_error = error;
        self
    }
}

pub fn render(context: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>⛰️ {}</title>\n", escape_html(PAGE_TITLE)));
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n<main>\n"));

    html.push_str(
        "<div class=\"header-box\">\
<div class=\"header-title\">⛰️ 復興區長者福利小幫手</div>\
<div class=\"header-subtitle\">桃園市復興區長 <b>蘇佐璽</b> 關心您 ❤️</div>\
</div>\n",
    );

    render_form(&mut html, context);

    html.push_str("<h3>💰 您的專屬福利試算結果</h3>\n");
    html.push_str(&format!(
        "<p class=\"caption\">共符合 {} 項福利</p>\n",
        context.report.qualified_count()
    ));

    let sections = context.report.sections();
    html.push_str("<nav class=\"tabs\">");
    for section in &sections {
        html.push_str(&format!(
            "<a href=\"#{}\">{} {} ({})</a>",
            section_anchor(section.category),
            section.category.icon(),
            section.category.label(),
            section.qualified()
        ));
    }
    html.push_str("</nav>\n");

    for section in &sections {
        render_section(&mut html, section);
    }

    render_footer(&mut html);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, context: &PageContext<'_>) {
    let applicant = context.report.applicant();
    let age = applicant.age();

    html.push_str("<form class=\"input-box\" method=\"get\" action=\"/\">\n");
    html.push_str("<h3>📝 請勾選長輩狀況</h3>\n");
    if let Some(error) = context.age_error {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\">⚠️ {}，已沿用 {} 歲試算</div>\n",
            escape_html(&error.to_string()),
            age
        ));
    }
    html.push_str("<div class=\"input-row\">");
    html.push_str(&format!(
        "<label>長輩年齡 (歲) <input type=\"number\" name=\"age\" min=\"{MIN_AGE}\" max=\"{MAX_AGE}\" step=\"1\" value=\"{age}\" required></label>"
    ));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"last_age\" value=\"{age}\">"
    ));
    html.push_str("<div class=\"info\">本系統以 <b>原住民身分</b> 為預設計算標準</div>");
    html.push_str("</div>\n<div class=\"checks\">\n");
    for status in Status::ordered() {
        let checked = if applicant.has(status) { " checked" } else { "" };
        html.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"{}\" value=\"on\"{checked}> {} {}</label>\n",
            status.field(),
            status.icon(),
            status.label()
        ));
    }
    html.push_str("</div>\n<button type=\"submit\">開始試算</button>\n</form>\n");
}

fn render_section(html: &mut String, section: &CategorySection<'_>) {
    let category = section.category;
    html.push_str(&format!(
        "<section id=\"{}\">\n<h4>{} {}</h4>\n<p class=\"caption\">{}</p>\n",
        section_anchor(category),
        category.icon(),
        category.label(),
        category.caption()
    ));
    for result in &section.results {
        if result.qualifies {
            render_card(html, result);
        } else {
            render_locked(html, result);
        }
    }
    html.push_str("</section>\n");
}

fn render_card(html: &mut String, result: &EvaluationResult) {
    let rule = result.rule;
    let class = if rule.highlight {
        "benefit-card highlight"
    } else {
        "benefit-card"
    };
    html.push_str(&format!(
        "<div class=\"{class}\" data-index=\"{}\">\
<div class=\"card-head\"><div class=\"card-title\">{}. {}</div><div class=\"location-tag\">{}</div></div>\
<div style=\"margin-top: 8px;\"><span class=\"money-tag\">{}</span></div>\
<div class=\"card-note\">💡 {}</div>\
</div>\n",
        rule.index,
        rule.index,
        escape_html(rule.name),
        escape_html(rule.office),
        escape_html(rule.amount),
        escape_html(rule.note)
    ));
}

fn render_locked(html: &mut String, result: &EvaluationResult) {
    let rule = result.rule;
    html.push_str(&format!(
        "<details class=\"locked\" data-index=\"{}\">\
<summary>🔒 {}. {} (未符條件)</summary>\
<p class=\"caption\">需滿足條件：{}</p>\
<p class=\"caption\">承辦單位：{}</p>\
</details>\n",
        rule.index,
        rule.index,
        escape_html(rule.name),
        escape_html(rule.note),
        escape_html(rule.office)
    ));
}

fn render_footer(html: &mut String) {
    html.push_str("<footer>\n");
    for group in ContactGroup::ordered() {
        html.push_str(&format!("<div>\n<h4>{}</h4>\n<ul>\n", group.label()));
        for contact in contacts_in(group) {
            html.push_str(&format!(
                "<li><b>{}</b>：{}</li>\n",
                escape_html(contact.name),
                escape_html(contact.phone)
            ));
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</footer>\n");
    html.push_str(&format!(
        "<div class=\"disclaimer\">⚠️ {}</div>\n",
        escape_html(DISCLAIMER)
    ));
}

fn section_anchor(category: Category) -> &'static str {
    match category {
        Category::Cash => "cash",
        Category::Medical => "medical",
        Category::HousingTransport => "housing-transport",
        Category::Other => "other",
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
