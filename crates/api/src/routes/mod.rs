//! HTTP Routes

pub mod assessments;
pub mod form;
pub mod schema;
