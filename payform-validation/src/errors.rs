// Field validation errors

use crate::Field;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Card number rejection reasons, in check order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardNumberError {
    /// Something other than digits, spaces or hyphens was supplied
    #[error("the card number only accepts digits")]
    NotDigits,

    /// Fewer than 13 or more than 19 digits
    #[error("the card number must have between 13 and 19 digits")]
    InvalidLength,

    /// Luhn checksum mismatch
    #[error("the card number is not valid")]
    FailedChecksum,
}

impl CardNumberError {
    /// Stable identifier used as the message catalog key
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotDigits => "card_number.not_digits",
            Self::InvalidLength => "card_number.invalid_length",
            Self::FailedChecksum => "card_number.failed_checksum",
        }
    }
}

/// Expiration date rejection reasons, in check order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpDateError {
    /// Not exactly `MM/YY`
    #[error("the expiration date must use the MM/YY format")]
    BadFormat,

    /// Month outside 01..=12
    #[error("the expiration month must be between 01 and 12")]
    BadMonth,

    /// The card expired before the reference month
    #[error("the card is expired")]
    Expired,

    /// More than the allowed number of years ahead
    #[error("the expiration date is too far in the future")]
    TooFarFuture,
}

impl ExpDateError {
    /// Stable identifier used as the message catalog key
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadFormat => "exp_date.bad_format",
            Self::BadMonth => "exp_date.bad_month",
            Self::Expired => "exp_date.expired",
            Self::TooFarFuture => "exp_date.too_far_future",
        }
    }
}

/// CVV rejection reasons, in check order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CvvError {
    #[error("the cvv only accepts digits")]
    NotDigits,

    #[error("the cvv must have 3 or 4 digits")]
    InvalidLength,
}

impl CvvError {
    /// Stable identifier used as the message catalog key
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotDigits => "cvv.not_digits",
            Self::InvalidLength => "cvv.invalid_length",
        }
    }
}

/// Cardholder name rejection reasons, in check order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameError {
    #[error("the name on card must have at least 2 characters")]
    EmptyOrTooShort,

    #[error("the name on card must have at most 60 characters")]
    TooLong,

    #[error("the name on card only accepts letters, spaces, apostrophes and hyphens")]
    IllegalCharacter,
}

impl NameError {
    /// Stable identifier used as the message catalog key
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyOrTooShort => "name_on_card.empty_or_too_short",
            Self::TooLong => "name_on_card.too_long",
            Self::IllegalCharacter => "name_on_card.illegal_character",
        }
    }
}

/// Billing email rejection reasons, in check order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailError {
    #[error("the email exceeds the maximum length of 254 characters")]
    TooLong,

    #[error("the email address is not valid")]
    MalformedAddress,
}

impl EmailError {
    /// Stable identifier used as the message catalog key
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooLong => "billing_email.too_long",
            Self::MalformedAddress => "billing_email.malformed_address",
        }
    }
}

/// Any field rejection.
///
/// Serializes as its [`code`](FieldError::code).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    #[error(transparent)]
    CardNumber(#[from] CardNumberError),

    #[error(transparent)]
    ExpDate(#[from] ExpDateError),

    #[error(transparent)]
    Cvv(#[from] CvvError),

    #[error(transparent)]
    NameOnCard(#[from] NameError),

    #[error(transparent)]
    BillingEmail(#[from] EmailError),
}

impl FieldError {
    /// Every error the validators can produce.
    pub const ALL: [FieldError; 14] = [
        FieldError::CardNumber(CardNumberError::NotDigits),
        FieldError::CardNumber(CardNumberError::InvalidLength),
        FieldError::CardNumber(CardNumberError::FailedChecksum),
        FieldError::ExpDate(ExpDateError::BadFormat),
        FieldError::ExpDate(ExpDateError::BadMonth),
        FieldError::ExpDate(ExpDateError::Expired),
        FieldError::ExpDate(ExpDateError::TooFarFuture),
        FieldError::Cvv(CvvError::NotDigits),
        FieldError::Cvv(CvvError::InvalidLength),
        FieldError::NameOnCard(NameError::EmptyOrTooShort),
        FieldError::NameOnCard(NameError::TooLong),
        FieldError::NameOnCard(NameError::IllegalCharacter),
        FieldError::BillingEmail(EmailError::TooLong),
        FieldError::BillingEmail(EmailError::MalformedAddress),
    ];

    /// Stable identifier, e.g. `exp_date.expired`
    pub fn code(&self) -> &'static str {
        match self {
            Self::CardNumber(e) => e.code(),
            Self::ExpDate(e) => e.code(),
            Self::Cvv(e) => e.code(),
            Self::NameOnCard(e) => e.code(),
            Self::BillingEmail(e) => e.code(),
        }
    }

    /// The form field this error belongs to
    pub fn field(&self) -> Field {
        match self {
            Self::CardNumber(_) => Field::CardNumber,
            Self::ExpDate(_) => Field::ExpDate,
            Self::Cvv(_) => Field::Cvv,
            Self::NameOnCard(_) => Field::NameOnCard,
            Self::BillingEmail(_) => Field::BillingEmail,
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Errors raised while loading policies or message tables
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse policy: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid policy: {0}")]
    ValidationError(String),

    #[error("Failed to parse message table: {0}")]
    MessageTableError(#[from] serde_json::Error),

    #[error("Unknown message code: {0}")]
    UnknownMessageCode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = FieldError::ALL.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), FieldError::ALL.len());
    }

    #[test]
    fn test_codes_are_prefixed_by_error_key() {
        for error in FieldError::ALL {
            let prefix = format!("{}.", error.field().error_key());
            assert!(error.code().starts_with(&prefix), "{}", error.code());
        }
    }

    #[test]
    fn test_umbrella_display_is_transparent() {
        let error: FieldError = ExpDateError::Expired.into();
        assert_eq!(error.to_string(), "the card is expired");
        assert_eq!(error.field(), Field::ExpDate);
    }

    #[test]
    fn test_serializes_as_code() {
        let error = FieldError::from(CvvError::InvalidLength);
        assert_eq!(
            serde_json::to_value(error).unwrap(),
            serde_json::json!("cvv.invalid_length")
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
        assert_send_sync::<ConfigError>();
    }
}
