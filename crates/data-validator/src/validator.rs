//! Data Validator for Range Checking

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration: declared domain of every bounded answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Age in whole years
    pub age_range: (f64, f64),
    /// Body mass index
    pub bmi_range: (f64, f64),
    /// Days of poor physical or mental health in the last 30 days
    pub health_days_range: (f64, f64),
    /// General health rating (1 = excellent, 5 = poor)
    pub gen_hlth_range: (f64, f64),
    /// Education level
    pub education_range: (f64, f64),
    /// Income scale
    pub income_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (18.0, 110.0),
            bmi_range: (10.0, 60.0),
            health_days_range: (0.0, 30.0),
            gen_hlth_range: (1.0, 5.0),
            education_range: (1.0, 6.0),
            income_range: (1.0, 8.0),
        }
    }
}

/// Declared domain of a single field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDomain {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Record the outcome of one field check
    pub fn check(&mut self, outcome: Result<(), ValidationError>) {
        self.fields_checked += 1;
        if let Err(e) = outcome {
            self.valid = false;
            self.errors.push(e);
        }
    }

    /// Convert into `Err` carrying every violation when any check failed
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Data validator for questionnaire answers
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
        if value < range.0 || value > range.1 {
            debug!("{} = {} outside [{}, {}]", field, value, range.0, range.1);
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate age in years
    pub fn validate_age(&self, age: u32) -> Result<(), ValidationError> {
        self.validate_range("age", f64::from(age), self.config.age_range)
    }

    /// Validate BMI
    pub fn validate_bmi(&self, bmi: f64) -> Result<(), ValidationError> {
        self.validate_range("bmi", bmi, self.config.bmi_range)
    }

    /// Validate days of poor physical health
    pub fn validate_phys_hlth_days(&self, days: u8) -> Result<(), ValidationError> {
        self.validate_range("phys_hlth_days", f64::from(days), self.config.health_days_range)
    }

    /// Validate days of poor mental health
    pub fn validate_ment_hlth_days(&self, days: u8) -> Result<(), ValidationError> {
        self.validate_range("ment_hlth_days", f64::from(days), self.config.health_days_range)
    }

    /// Validate general health rating
    pub fn validate_gen_hlth(&self, rating: u8) -> Result<(), ValidationError> {
        self.validate_range("gen_hlth", f64::from(rating), self.config.gen_hlth_range)
    }

    /// Validate education level
    pub fn validate_education(&self, level: u8) -> Result<(), ValidationError> {
        self.validate_range("education", f64::from(level), self.config.education_range)
    }

    /// Validate income scale
    pub fn validate_income(&self, scale: u8) -> Result<(), ValidationError> {
        self.validate_range("income", f64::from(scale), self.config.income_range)
    }

    /// Declared domains of every bounded field, in form order
    pub fn domains(&self) -> Vec<FieldDomain> {
        let c = &self.config;
        [
            ("age", c.age_range),
            ("bmi", c.bmi_range),
            ("phys_hlth_days", c.health_days_range),
            ("ment_hlth_days", c.health_days_range),
            ("gen_hlth", c.gen_hlth_range),
            ("education", c.education_range),
            ("income", c.income_range),
        ]
        .into_iter()
        .map(|(field, (min, max))| FieldDomain { field, min, max })
        .collect()
    }

    /// Current configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_age_bounds_inclusive() {
        let validator = Validator::default();
        assert!(validator.validate_age(18).is_ok());
        assert!(validator.validate_age(110).is_ok());
        assert!(validator.validate_age(17).is_err());
        assert!(validator.validate_age(111).is_err());
    }

    #[test]
    fn test_bmi_range() {
        let validator = Validator::default();
        assert!(validator.validate_bmi(10.0).is_ok());
        assert!(validator.validate_bmi(60.0).is_ok());
        assert!(validator.validate_bmi(9.99).is_err());
        assert!(validator.validate_bmi(60.01).is_err());
    }

    #[test]
    fn test_non_finite_bmi() {
        let validator = Validator::default();
        assert_eq!(
            validator.validate_bmi(f64::NAN),
            Err(ValidationError::NonFinite { field: "bmi" })
        );
        assert!(validator.validate_bmi(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ordinal_ranges() {
        let validator = Validator::default();
        assert!(validator.validate_gen_hlth(0).is_err());
        assert!(validator.validate_gen_hlth(5).is_ok());
        assert!(validator.validate_gen_hlth(6).is_err());
        assert!(validator.validate_education(6).is_ok());
        assert!(validator.validate_education(7).is_err());
        assert!(validator.validate_income(8).is_ok());
        assert!(validator.validate_income(9).is_err());
        assert!(validator.validate_ment_hlth_days(31).is_err());
    }

    #[test]
    fn test_result_collects_every_violation() {
        let validator = Validator::default();
        let mut result = ValidationResult::valid(0);
        result.check(validator.validate_age(12));
        result.check(validator.validate_bmi(25.0));
        result.check(validator.validate_income(0));

        assert_eq!(result.fields_checked, 3);
        let errors = result.into_result().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), "age");
        assert_eq!(errors[1].field(), "income");
    }

    #[test]
    fn test_domains_listing() {
        let domains = Validator::default().domains();
        assert_eq!(domains.len(), 7);
        assert_eq!(domains[0], FieldDomain { field: "age", min: 18.0, max: 110.0 });
    }

    proptest! {
        #[test]
        fn prop_health_days_accept_exactly_zero_to_thirty(days in any::<u8>()) {
            let validator = Validator::default();
            prop_assert_eq!(validator.validate_phys_hlth_days(days).is_ok(), days <= 30);
        }
    }
}
