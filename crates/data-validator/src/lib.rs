//! Data Validation
//!
//! Provides declared field domains, range checking and coercion of
//! yes/no answers for the risk questionnaire.

mod coerce;
mod error;
mod validator;

pub use coerce::coerce_flag;
pub use error::ValidationError;
pub use validator::{FieldDomain, ValidationConfig, ValidationResult, Validator};
