mod error;
mod numeric;

pub use error::ValidationError;
pub use numeric::{NumericValidator, is_numeric};

use serde_json::Value;

/// A check applied to one labelled form value before it is accepted.
pub trait FieldValidator {
    fn validate(&self, label: &str, value: &Value) -> Result<(), ValidationError>;
}
