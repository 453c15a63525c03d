//! Yes/No Answer Coercion

use crate::error::ValidationError;
use tracing::debug;

const FLAG_CHOICES: &str = "yes/no, true/false, on/off, 1/0";

/// Coerce a textual yes/no answer into a boolean.
///
/// Accepts the values produced by select boxes ("Yes"/"No"), HTML checkboxes
/// ("on") and plain booleans, case-insensitively. Anything else is rejected
/// rather than guessed.
pub fn coerce_flag(field: &'static str, raw: &str) -> Result<bool, ValidationError> {
    let value = raw.trim().to_ascii_lowercase();
    match value.as_str() {
        "yes" | "y" | "true" | "on" | "1" | "checked" => Ok(true),
        "no" | "n" | "false" | "off" | "0" => Ok(false),
        _ => {
            debug!("Rejected {} answer {:?}", field, raw);
            Err(ValidationError::InvalidChoice {
                field,
                value: raw.to_string(),
                expected: FLAG_CHOICES,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_box_answers() {
        assert_eq!(coerce_flag("high_bp", "Yes"), Ok(true));
        assert_eq!(coerce_flag("high_bp", "No"), Ok(false));
    }

    #[test]
    fn test_checkbox_and_boolean_answers() {
        assert_eq!(coerce_flag("smoker", "on"), Ok(true));
        assert_eq!(coerce_flag("smoker", "TRUE"), Ok(true));
        assert_eq!(coerce_flag("smoker", " false "), Ok(false));
        assert_eq!(coerce_flag("smoker", "0"), Ok(false));
    }

    #[test]
    fn test_unknown_answer_rejected() {
        let err = coerce_flag("stroke", "maybe").unwrap_err();
        assert_eq!(err.field(), "stroke");
        assert!(coerce_flag("stroke", "").is_err());
    }
}
