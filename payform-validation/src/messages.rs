//! Human-readable error messages.
//!
//! Validators only produce typed errors. The text shown to a user comes from
//! a [`MessageCatalog`] keyed by [`FieldError::code`], so callers can ship
//! their own wording or language without touching validation rules.

use crate::{ConfigError, FieldError, Result};
use std::collections::HashMap;

/// Message table keyed by error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// The built-in English messages
    pub fn english() -> Self {
        let messages = FieldError::ALL
            .iter()
            .map(|error| (error.code().to_string(), error.to_string()))
            .collect();
        Self { messages }
    }

    /// The built-in Spanish messages
    pub fn spanish() -> Self {
        let mut catalog = Self::english();
        for (code, message) in SPANISH {
            catalog.messages.insert(code.to_string(), message.to_string());
        }
        catalog
    }

    /// Load overrides from a flat JSON object of `code -> message`.
    ///
    /// Codes missing from the object keep their English text. Unknown codes
    /// are rejected so a typo in a table does not go unnoticed.
    ///
    /// ```
    /// use payform_validation::{CvvError, FieldError, MessageCatalog};
    ///
    /// let catalog = MessageCatalog::from_json(r#"{"cvv.not_digits": "Digits only"}"#).unwrap();
    /// assert_eq!(catalog.message(&FieldError::from(CvvError::NotDigits)), "Digits only");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut catalog = Self::english();

        for (code, message) in overrides {
            if !catalog.messages.contains_key(&code) {
                return Err(ConfigError::UnknownMessageCode(code));
            }
            catalog.messages.insert(code, message);
        }

        Ok(catalog)
    }

    /// Replace the message for one error
    pub fn with_message(mut self, error: FieldError, message: impl Into<String>) -> Self {
        self.messages.insert(error.code().to_string(), message.into());
        self
    }

    /// Get the message for a code
    pub fn get(&self, code: &str) -> Option<&str> {
        self.messages.get(code).map(|s| s.as_str())
    }

    /// Render an error, falling back to its English text
    pub fn message(&self, error: &FieldError) -> String {
        self.get(error.code())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string())
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

const SPANISH: [(&str, &str); 14] = [
    ("card_number.not_digits", "la tarjeta solo acepta dígitos"),
    ("card_number.invalid_length", "la tarjeta debe tener entre 13 y 19 dígitos"),
    ("card_number.failed_checksum", "el número de tarjeta no es válido"),
    ("exp_date.bad_format", "Formato de fecha incorrecto. Debe ser MM/YY"),
    ("exp_date.bad_month", "el mes debe estar entre 01 y 12"),
    ("exp_date.expired", "la tarjeta está vencida"),
    ("exp_date.too_far_future", "la fecha de vencimiento es demasiado lejana"),
    ("cvv.not_digits", "el cvv solo acepta dígitos"),
    ("cvv.invalid_length", "el cvv debe tener 3 o 4 dígitos"),
    ("name_on_card.empty_or_too_short", "el nombre debe tener al menos 2 caracteres"),
    ("name_on_card.too_long", "el nombre no puede superar los 60 caracteres"),
    (
        "name_on_card.illegal_character",
        "el nombre solo admite letras, espacios, apóstrofos y guiones",
    ),
    ("billing_email.too_long", "el correo supera la longitud máxima de 254 caracteres"),
    ("billing_email.malformed_address", "el correo electrónico no es válido"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmailError, ExpDateError};

    #[test]
    fn test_english_covers_every_error() {
        let catalog = MessageCatalog::english();
        for error in FieldError::ALL {
            assert_eq!(catalog.get(error.code()), Some(error.to_string().as_str()));
        }
    }

    #[test]
    fn test_spanish_covers_every_error() {
        let english = MessageCatalog::english();
        let spanish = MessageCatalog::spanish();
        for error in FieldError::ALL {
            assert_ne!(spanish.message(&error), english.message(&error), "{}", error.code());
        }
    }

    #[test]
    fn test_from_json_unknown_code() {
        let result = MessageCatalog::from_json(r#"{"cvv.too_short": "nope"}"#);
        assert!(matches!(result, Err(ConfigError::UnknownMessageCode(code)) if code == "cvv.too_short"));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = MessageCatalog::from_json("[1, 2]");
        assert!(matches!(result, Err(ConfigError::MessageTableError(_))));
    }

    #[test]
    fn test_with_message() {
        let expired = FieldError::from(ExpDateError::Expired);
        let catalog = MessageCatalog::default().with_message(expired, "Card expired");
        assert_eq!(catalog.message(&expired), "Card expired");
        assert_eq!(
            catalog.message(&FieldError::from(EmailError::TooLong)),
            "the email exceeds the maximum length of 254 characters"
        );
    }
}
