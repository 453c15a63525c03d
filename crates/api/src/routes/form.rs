//! Questionnaire Form Routes

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use data_validator::{coerce_flag, ValidationError};
use feature_engine::{RawInput, Sex};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::html::{render_errors, render_form, render_result};
use crate::{run_assessment, ApiError, AppState};

/// Form body as posted by the questionnaire page.
///
/// Select boxes send "Yes"/"No"; checkboxes are absent when unchecked and
/// send "on" when checked.
#[derive(Debug, Deserialize)]
pub struct AssessmentForm {
    pub age: u32,
    pub bmi: f64,
    pub phys_hlth_days: u8,
    pub ment_hlth_days: u8,
    pub gen_hlth: u8,
    pub education: u8,
    pub income: u8,
    pub high_bp: String,
    pub high_chol: String,
    pub sex: String,
    pub chol_check: Option<String>,
    pub smoker: Option<String>,
    pub stroke: Option<String>,
    pub heart_disease: Option<String>,
    pub phys_activity: Option<String>,
    pub fruits: Option<String>,
    pub veggies: Option<String>,
    pub hvy_alcohol: Option<String>,
    pub any_healthcare: Option<String>,
    pub no_doc_bc_cost: Option<String>,
    pub diff_walk: Option<String>,
}

impl AssessmentForm {
    /// Coerce textual answers, reporting every unrecognised one
    pub fn into_raw_input(self) -> Result<RawInput, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut flag = |field: &'static str, value: Option<&str>| match value.map(|v| coerce_flag(field, v)) {
            None => false,
            Some(Ok(answer)) => answer,
            Some(Err(e)) => {
                errors.push(e);
                false
            }
        };

        let high_bp = flag("high_bp", Some(self.high_bp.as_str()));
        let high_chol = flag("high_chol", Some(self.high_chol.as_str()));
        let chol_check = flag("chol_check", self.chol_check.as_deref());
        let smoker = flag("smoker", self.smoker.as_deref());
        let stroke = flag("stroke", self.stroke.as_deref());
        let heart_disease = flag("heart_disease", self.heart_disease.as_deref());
        let phys_activity = flag("phys_activity", self.phys_activity.as_deref());
        let fruits = flag("fruits", self.fruits.as_deref());
        let veggies = flag("veggies", self.veggies.as_deref());
        let hvy_alcohol = flag("hvy_alcohol", self.hvy_alcohol.as_deref());
        let any_healthcare = flag("any_healthcare", self.any_healthcare.as_deref());
        let no_doc_bc_cost = flag("no_doc_bc_cost", self.no_doc_bc_cost.as_deref());
        let diff_walk = flag("diff_walk", self.diff_walk.as_deref());

        let sex = self.sex.parse::<Sex>().map_err(|e| errors.push(e)).ok();

        match sex {
            Some(sex) if errors.is_empty() => Ok(RawInput {
                age: self.age,
                bmi: self.bmi,
                phys_hlth_days: self.phys_hlth_days,
                ment_hlth_days: self.ment_hlth_days,
                gen_hlth: self.gen_hlth,
                education: self.education,
                income: self.income,
                high_bp,
                high_chol,
                chol_check,
                smoker,
                stroke,
                heart_disease,
                phys_activity,
                fruits,
                veggies,
                hvy_alcohol,
                any_healthcare,
                no_doc_bc_cost,
                diff_walk,
                sex,
            }),
            _ => Err(errors),
        }
    }
}

/// Render the questionnaire with default answers
pub async fn show_form(State(state): State<Arc<AppState>>) -> Html<String> {
    let domains = state.engine.encoder().validator().config();
    Html(render_form(&RawInput::default(), domains))
}

fn error_page(status: StatusCode, errors: &[String]) -> Response {
    (status, Html(render_errors(errors))).into_response()
}

/// Assess one form submission and render the result page
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<AssessmentForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Malformed form submission: {}", rejection.body_text());
            return error_page(rejection.status(), &[rejection.body_text()]);
        }
    };

    let raw = match form.into_raw_input() {
        Ok(raw) => raw,
        Err(errors) => {
            crate::telemetry::record_rejection();
            warn!("Rejected form submission with {} unrecognised answer(s)", errors.len());
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return error_page(StatusCode::UNPROCESSABLE_ENTITY, &messages);
        }
    };

    match run_assessment(&state, &raw) {
        Ok(assessment) => Html(render_result(&assessment)).into_response(),
        Err(ApiError::InvalidInput(errors)) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            error_page(StatusCode::UNPROCESSABLE_ENTITY, &messages)
        }
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, &[e.to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AssessmentForm {
        AssessmentForm {
            age: 30,
            bmi: 25.0,
            phys_hlth_days: 0,
            ment_hlth_days: 0,
            gen_hlth: 2,
            education: 4,
            income: 5,
            high_bp: "Yes".to_string(),
            high_chol: "No".to_string(),
            sex: "Female".to_string(),
            chol_check: Some("on".to_string()),
            smoker: None,
            stroke: None,
            heart_disease: None,
            phys_activity: Some("on".to_string()),
            fruits: Some("on".to_string()),
            veggies: Some("on".to_string()),
            hvy_alcohol: None,
            any_healthcare: Some("on".to_string()),
            no_doc_bc_cost: None,
            diff_walk: None,
        }
    }

    #[test]
    fn test_form_coercion() {
        let raw = form().into_raw_input().unwrap();
        assert!(raw.high_bp);
        assert!(!raw.high_chol);
        assert!(raw.chol_check);
        assert!(!raw.smoker);
        assert_eq!(raw.sex, Sex::Female);
    }

    #[test]
    fn test_form_reports_every_bad_answer() {
        let bad = AssessmentForm {
            high_bp: "Sometimes".to_string(),
            smoker: Some("maybe".to_string()),
            sex: "Other".to_string(),
            ..form()
        };
        let errors = bad.into_raw_input().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["high_bp", "smoker", "sex"]);
    }
}
