//! HTML Pages

use data_validator::ValidationConfig;
use feature_engine::{RawInput, Sex};
use inference_engine::{format_percent, RiskAssessment, DISCLAIMER};

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
fieldset{margin-bottom:1rem}label{display:block;margin:.4rem 0}\
.result{padding:1rem;border-radius:.4rem}.high{background:#fde2e4}.low{background:#e3f6ea}\
.errors{background:#fff4e5;padding:1rem}small{color:#666}";

/// Escape text for use in element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body><h1>Diabetes Health Risk Predictor</h1>{body}\
         <p><small>{disclaimer}</small></p></body></html>",
        title = escape(title),
        body = body,
        disclaimer = escape(DISCLAIMER),
    )
}

fn number_input(name: &str, label: &str, value: f64, range: (f64, f64), step: &str) -> String {
    format!(
        "<label>{label} <input type=\"number\" name=\"{name}\" value=\"{value}\" \
         min=\"{min}\" max=\"{max}\" step=\"{step}\" required></label>",
        min = range.0,
        max = range.1,
    )
}

fn yes_no_select(name: &str, label: &str, value: bool) -> String {
    let (no, yes) = if value { ("", " selected") } else { (" selected", "") };
    format!(
        "<label>{label} <select name=\"{name}\">\
         <option value=\"No\"{no}>No</option><option value=\"Yes\"{yes}>Yes</option>\
         </select></label>"
    )
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!("<label><input type=\"checkbox\" name=\"{name}\"{checked}> {label}</label>")
}

fn sex_radio(sex: Sex) -> String {
    let options: String = [Sex::Female, Sex::Male]
        .iter()
        .map(|option| {
            let checked = if *option == sex { " checked" } else { "" };
            format!(
                "<input type=\"radio\" name=\"sex\" value=\"{value}\"{checked}> {value} ",
                value = option.as_str()
            )
        })
        .collect();
    format!("<label>Sex {options}</label>")
}

/// Questionnaire pre-filled with `values`
pub fn render_form(values: &RawInput, domains: &ValidationConfig) -> String {
    let core = [
        number_input("age", "How old are you?", f64::from(values.age), domains.age_range, "1"),
        number_input("bmi", "Your BMI (Body Mass Index)", values.bmi, domains.bmi_range, "0.1"),
        number_input(
            "phys_hlth_days",
            "Days of poor physical health (last 30 days)",
            f64::from(values.phys_hlth_days),
            domains.health_days_range,
            "1",
        ),
        yes_no_select("high_bp", "Do you have High Blood Pressure?", values.high_bp),
        yes_no_select("high_chol", "Do you have High Cholesterol?", values.high_chol),
        number_input(
            "gen_hlth",
            "General Health Rating (1 = Excellent, 5 = Poor)",
            f64::from(values.gen_hlth),
            domains.gen_hlth_range,
            "1",
        ),
    ]
    .concat();

    let lifestyle = [
        checkbox("diff_walk", "Difficulty walking or climbing stairs?", values.diff_walk),
        checkbox("heart_disease", "History of heart disease or attack?", values.heart_disease),
        checkbox("stroke", "History of stroke?", values.stroke),
        checkbox("smoker", "Smoked 100+ cigarettes in lifetime?", values.smoker),
        checkbox("phys_activity", "Regular physical activity?", values.phys_activity),
        sex_radio(values.sex),
        number_input(
            "ment_hlth_days",
            "Days of poor mental health (last 30 days)",
            f64::from(values.ment_hlth_days),
            domains.health_days_range,
            "1",
        ),
        checkbox("hvy_alcohol", "Heavy alcohol consumption?", values.hvy_alcohol),
        checkbox("any_healthcare", "Have health insurance?", values.any_healthcare),
        checkbox("chol_check", "Had a cholesterol check recently?", values.chol_check),
        checkbox("fruits", "Eat fruit daily?", values.fruits),
        checkbox("veggies", "Eat vegetables daily?", values.veggies),
        checkbox("no_doc_bc_cost", "Skipped doctor visit due to cost?", values.no_doc_bc_cost),
        number_input(
            "education",
            "Education Level (1-6)",
            f64::from(values.education),
            domains.education_range,
            "1",
        ),
        number_input(
            "income",
            "Income Scale (1-8)",
            f64::from(values.income),
            domains.income_range,
            "1",
        ),
    ]
    .concat();

    let body = format!(
        "<p>Enter your metrics to assess your risk based on lifestyle and health indicators.</p>\
         <form method=\"post\" action=\"/assess\">\
         <fieldset><legend>Core Health Metrics</legend>{core}</fieldset>\
         <fieldset><legend>Additional Lifestyle &amp; History</legend>\
         <p><small>The following are set to common defaults. Adjust them for a more precise \
         prediction.</small></p>{lifestyle}</fieldset>\
         <button type=\"submit\">Calculate Risk Score</button></form>"
    );
    page("Diabetes Risk Predictor", &body)
}

/// Result of one assessment
pub fn render_result(assessment: &RiskAssessment) -> String {
    let body = format!(
        "<div class=\"result {class}\"><h2>{headline}</h2><p>{advice}</p>\
         <p><small>Positive-class probability {probability}</small></p></div>\
         <p><a href=\"/\">Assess again</a></p>",
        class = assessment.risk_level.as_str(),
        headline = escape(&assessment.headline()),
        advice = escape(assessment.risk_level.advice()),
        probability = format_percent(assessment.probability),
    );
    page(assessment.risk_level.label(), &body)
}

/// Rejected submission
pub fn render_errors(errors: &[String]) -> String {
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    let body = format!(
        "<div class=\"errors\"><h2>Please correct your answers</h2><ul>{items}</ul></div>\
         <p><a href=\"/\">Back to the form</a></p>"
    );
    page("Invalid answers", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_form_has_every_field() {
        let html = render_form(&RawInput::default(), &ValidationConfig::default());
        for name in [
            "age", "bmi", "phys_hlth_days", "ment_hlth_days", "gen_hlth", "education", "income",
            "high_bp", "high_chol", "chol_check", "smoker", "stroke", "heart_disease",
            "phys_activity", "fruits", "veggies", "hvy_alcohol", "any_healthcare",
            "no_doc_bc_cost", "diff_walk", "sex",
        ] {
            assert!(html.contains(&format!("name=\"{}\"", name)), "missing {}", name);
        }
        assert!(html.contains("Calculate Risk Score"));
        assert!(html.contains("min=\"18\" max=\"110\""));
    }

    #[test]
    fn test_form_reflects_defaults() {
        let html = render_form(&RawInput::default(), &ValidationConfig::default());
        assert!(html.contains("name=\"fruits\" checked"));
        assert!(html.contains("name=\"smoker\">"));
        assert!(html.contains("value=\"Female\" checked"));
    }

    #[test]
    fn test_error_page_escapes_input() {
        let html = render_errors(&["sex value \"<script>\" is not one of Female/Male".to_string()]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
