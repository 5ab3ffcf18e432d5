use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::i18n::{CoreTranslator, MSG_MUST_BE_NUMERIC, Translator};

use super::{FieldValidator, ValidationError};

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$",
    )
    .expect("numeric literal pattern compiles")
});

/// Whether `value` is a number or a string holding a decimal numeric literal.
///
/// Booleans, null, arrays and objects are never numeric. Hex, octal and
/// binary prefixes are not recognised.
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(text) => NUMERIC_LITERAL.is_match(text),
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct NumericValidator {
    translator: Arc<dyn Translator>,
}

impl Default for NumericValidator {
    fn default() -> Self {
        Self {
            translator: Arc::new(CoreTranslator::default()),
        }
    }
}

impl NumericValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }
}

impl FieldValidator for NumericValidator {
    fn validate(&self, label: &str, value: &Value) -> Result<(), ValidationError> {
        if is_numeric(value) {
            return Ok(());
        }
        let message = self.translator.translate(MSG_MUST_BE_NUMERIC, &[label]);
        Err(ValidationError::new(label, message))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::i18n::Language;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let validator = NumericValidator::new();
        for value in [
            json!(42),
            json!(-3.5),
            json!("10"),
            json!("-0.25"),
            json!("+7"),
            json!(".5"),
            json!("5."),
            json!("1e3"),
            json!("2.5E-4"),
            json!("  12  "),
        ] {
            assert!(
                validator.validate("Amount", &value).is_ok(),
                "{value} should be numeric"
            );
        }
    }

    #[test]
    fn rejects_everything_else_with_labelled_message() {
        let validator = NumericValidator::new();
        for value in [
            json!("abc"),
            json!(""),
            json!("."),
            json!("1,5"),
            json!("0x1A"),
            json!("12abc"),
            json!([]),
            json!({}),
            json!(null),
            json!(true),
        ] {
            let err = validator
                .validate("Amount", &value)
                .expect_err("value should be rejected");
            assert_eq!(err.label, "Amount");
            assert!(err.message.contains("Amount"), "{}", err.message);
        }
    }

    #[test]
    fn validation_is_repeatable() {
        let validator = NumericValidator::new();
        let value = json!("abc");
        let first = validator.validate("Qty", &value).unwrap_err();
        let second = validator.validate("Qty", &value).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "The field Qty must be numeric");
    }

    #[test]
    fn uses_configured_translator() {
        let validator =
            NumericValidator::new().with_translator(Arc::new(CoreTranslator::new(Language::Es)));
        let err = validator.validate("Precio", &json!("x")).unwrap_err();
        assert_eq!(err.message, "El campo Precio debe ser numérico");
    }
}
