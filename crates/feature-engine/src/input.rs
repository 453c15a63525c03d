//! Questionnaire Answers

use data_validator::{coerce_flag, ValidationError, ValidationResult, Validator};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex as recorded by the training survey.
///
/// Only the two values present in the training data are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(alias = "female", alias = "FEMALE")]
    Female,
    #[serde(alias = "male", alias = "MALE")]
    Male,
}

impl Sex {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Sex::Female),
            "male" | "m" => Ok(Sex::Male),
            _ => Err(ValidationError::InvalidChoice {
                field: "sex",
                value: s.to_string(),
                expected: "Female/Male",
            }),
        }
    }
}

/// Yes/no answer as JSON `true`, `1` or text such as `"Yes"`
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(u64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(answer) => Ok(answer),
        Flag::Number(n) => coerce_flag("answer", &n.to_string()).map_err(de::Error::custom),
        Flag::Text(text) => coerce_flag("answer", &text).map_err(de::Error::custom),
    }
}

/// Answers from one questionnaire submission.
///
/// Yes/no fields accept the same answers as the HTML form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Age in years (18-110)
    pub age: u32,
    /// Body mass index (10.0-60.0)
    pub bmi: f64,
    /// Days of poor physical health in the last 30 days (0-30)
    pub phys_hlth_days: u8,
    /// Days of poor mental health in the last 30 days (0-30)
    pub ment_hlth_days: u8,
    /// General health rating, 1 = excellent, 5 = poor
    pub gen_hlth: u8,
    /// Education level (1-6)
    pub education: u8,
    /// Income scale (1-8)
    pub income: u8,

    #[serde(deserialize_with = "deserialize_flag")]
    pub high_bp: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub high_chol: bool,
    /// Cholesterol checked within the last five years
    #[serde(deserialize_with = "deserialize_flag")]
    pub chol_check: bool,
    /// Smoked at least 100 cigarettes in lifetime
    #[serde(deserialize_with = "deserialize_flag")]
    pub smoker: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub stroke: bool,
    /// Coronary heart disease or myocardial infarction
    #[serde(deserialize_with = "deserialize_flag")]
    pub heart_disease: bool,
    /// Physical activity in the past 30 days
    #[serde(deserialize_with = "deserialize_flag")]
    pub phys_activity: bool,
    /// Eats fruit at least once per day
    #[serde(deserialize_with = "deserialize_flag")]
    pub fruits: bool,
    /// Eats vegetables at least once per day
    #[serde(deserialize_with = "deserialize_flag")]
    pub veggies: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub hvy_alcohol: bool,
    /// Has any kind of health care coverage
    #[serde(deserialize_with = "deserialize_flag")]
    pub any_healthcare: bool,
    /// Skipped a doctor visit in the last year because of cost
    #[serde(deserialize_with = "deserialize_flag")]
    pub no_doc_bc_cost: bool,
    /// Serious difficulty walking or climbing stairs
    #[serde(deserialize_with = "deserialize_flag")]
    pub diff_walk: bool,

    pub sex: Sex,
}

impl Default for RawInput {
    /// Form defaults shown before the user changes anything
    fn default() -> Self {
        Self {
            age: 30,
            bmi: 25.0,
            phys_hlth_days: 0,
            ment_hlth_days: 0,
            gen_hlth: 2,
            education: 4,
            income: 5,
            high_bp: false,
            high_chol: false,
            chol_check: true,
            smoker: false,
            stroke: false,
            heart_disease: false,
            phys_activity: true,
            fruits: true,
            veggies: true,
            hvy_alcohol: false,
            any_healthcare: true,
            no_doc_bc_cost: false,
            diff_walk: false,
            sex: Sex::Female,
        }
    }
}

impl RawInput {
    /// Check every bounded field against its declared domain.
    ///
    /// Booleans and `Sex` are valid by construction.
    pub fn validate(&self, validator: &Validator) -> ValidationResult {
        let mut result = ValidationResult::valid(0);
        result.check(validator.validate_age(self.age));
        result.check(validator.validate_bmi(self.bmi));
        result.check(validator.validate_phys_hlth_days(self.phys_hlth_days));
        result.check(validator.validate_ment_hlth_days(self.ment_hlth_days));
        result.check(validator.validate_gen_hlth(self.gen_hlth));
        result.check(validator.validate_education(self.education));
        result.check(validator.validate_income(self.income));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parsing() {
        assert_eq!("Female".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!(" male ".parse::<Sex>(), Ok(Sex::Male));
        assert!("other".parse::<Sex>().is_err());
        assert!("".parse::<Sex>().is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        let result = RawInput::default().validate(&Validator::default());
        assert!(result.valid);
        assert_eq!(result.fields_checked, 7);
    }

    #[test]
    fn test_validation_reports_all_fields() {
        let input = RawInput {
            age: 5,
            bmi: 75.0,
            gen_hlth: 9,
            ..Default::default()
        };
        let errors = input.validate(&Validator::default()).into_result().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["age", "bmi", "gen_hlth"]);
    }

    #[test]
    fn test_json_deserialization() {
        let json = r#"{
            "age": 45, "bmi": 31.5, "phys_hlth_days": 3, "ment_hlth_days": 0,
            "gen_hlth": 3, "education": 5, "income": 6,
            "high_bp": true, "high_chol": true, "chol_check": true,
            "smoker": false, "stroke": false, "heart_disease": false,
            "phys_activity": false, "fruits": true, "veggies": true,
            "hvy_alcohol": false, "any_healthcare": true, "no_doc_bc_cost": false,
            "diff_walk": false, "sex": "male"
        }"#;
        let input: RawInput = serde_json::from_str(json).expect("valid json");
        assert_eq!(input.sex, Sex::Male);
        assert_eq!(input.age, 45);
    }

    #[test]
    fn test_json_accepts_textual_answers() {
        let mut json = serde_json::to_value(RawInput::default()).unwrap();
        json["high_bp"] = serde_json::json!("Yes");
        json["high_chol"] = serde_json::json!("no");
        json["smoker"] = serde_json::json!(1);
        json["fruits"] = serde_json::json!("off");
        json["veggies"] = serde_json::json!(true);

        let input: RawInput = serde_json::from_value(json).unwrap();
        assert!(input.high_bp);
        assert!(!input.high_chol);
        assert!(input.smoker);
        assert!(!input.fruits);
        assert!(input.veggies);
    }

    #[test]
    fn test_json_rejects_unknown_answers() {
        for bad in [serde_json::json!("maybe"), serde_json::json!(2), serde_json::json!(null)] {
            let mut json = serde_json::to_value(RawInput::default()).unwrap();
            json["stroke"] = bad.clone();
            assert!(serde_json::from_value::<RawInput>(json).is_err(), "{}", bad);
        }
    }
}
