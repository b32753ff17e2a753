pub mod domain;
pub mod error;
pub mod form;

pub use domain::*;
pub use error::CoreError;
pub use form::{normalize, validate, CustomerDraft, Field, FormInput, ValidationReport};
