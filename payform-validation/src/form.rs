//! Payment form orchestration.
//!
//! Runs all five field validators on every submission and merges their
//! outcomes into a [`ValidationReport`]. A failing field never stops the
//! others from being checked.
//!
//! Report keys follow a fixed table:
//!
//! | Field | `errors` key | `clean` key |
//! |---|---|---|
//! | card number | `card_number` | `card` |
//! | expiration | `exp_date` | `exp_date` |
//! | CVV | `cvv` | (none) |
//! | cardholder name | `name_on_card` | `name_on_card` |
//! | billing email | `billing_email` | `billing_email` |

use crate::{
    FieldError, FieldOutcome, MessageCatalog, ValidationPolicy, YearMonth,
    validate_billing_email, validate_card_number_with, validate_cvv, validate_exp_date_with,
    validate_name_on_card,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A payment form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardNumber,
    ExpDate,
    Cvv,
    NameOnCard,
    BillingEmail,
}

/// `(field, errors key, clean key)`, indexed by `Field as usize`.
///
/// The errors key mirrors the input parameter name; the clean key is the
/// shorter storage alias. The CVV has no clean key.
const FIELD_KEYS: [(Field, &str, Option<&str>); 5] = [
    (Field::CardNumber, "card_number", Some("card")),
    (Field::ExpDate, "exp_date", Some("exp_date")),
    (Field::Cvv, "cvv", None),
    (Field::NameOnCard, "name_on_card", Some("name_on_card")),
    (Field::BillingEmail, "billing_email", Some("billing_email")),
];

impl Field {
    /// Every field, in validation order
    pub const ALL: [Field; 5] = [
        Field::CardNumber,
        Field::ExpDate,
        Field::Cvv,
        Field::NameOnCard,
        Field::BillingEmail,
    ];

    /// Key used in [`ValidationReport::errors`]
    pub fn error_key(self) -> &'static str {
        FIELD_KEYS[self as usize].1
    }

    /// Key used in [`ValidationReport::clean`], `None` for secrets
    pub fn clean_key(self) -> Option<&'static str> {
        FIELD_KEYS[self as usize].2
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_key())
    }
}

/// Raw, untrusted form input.
///
/// Missing or `null` fields deserialize as empty strings. `Debug` output
/// masks the card number down to its last four digits and never shows the
/// CVV.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    #[serde(deserialize_with = "null_as_empty")]
    pub card_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub exp_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cvv: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub name_on_card: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub billing_email: String,
}

impl PaymentForm {
    /// Create a new form submission
    pub fn new(
        card_number: impl Into<String>,
        exp_date: impl Into<String>,
        cvv: impl Into<String>,
        name_on_card: impl Into<String>,
        billing_email: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            exp_date: exp_date.into(),
            cvv: cvv.into(),
            name_on_card: name_on_card.into(),
            billing_email: billing_email.into(),
        }
    }
}

impl fmt::Debug for PaymentForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentForm")
            .field("card_number", &payform_log::mask_card_number(&self.card_number))
            .field("exp_date", &self.exp_date)
            .field("cvv", &"[REDACTED]")
            .field("name_on_card", &self.name_on_card)
            .field("billing_email", &self.billing_email)
            .finish()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of validating one form.
///
/// `clean` always holds the four non-secret clean keys, empty for rejected
/// fields. `errors` holds a message for each rejected field and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub clean: BTreeMap<&'static str, String>,
    pub errors: BTreeMap<&'static str, String>,
    #[serde(skip)]
    failures: BTreeMap<Field, FieldError>,
}

impl ValidationReport {
    fn record(&mut self, field: Field, outcome: FieldOutcome, messages: &MessageCatalog) {
        if let Some(key) = field.clean_key() {
            let clean = if outcome.error.is_some() {
                String::new()
            } else {
                outcome.clean
            };
            self.clean.insert(key, clean);
        }

        if let Some(error) = outcome.error {
            self.errors.insert(field.error_key(), messages.message(&error));
            self.failures.insert(field, error);
        }
    }

    /// Whether every field passed
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// The typed error for a field, if it was rejected
    pub fn failure(&self, field: Field) -> Option<FieldError> {
        self.failures.get(&field).copied()
    }

    /// Rejected fields with their typed errors, in validation order
    pub fn failures(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.failures.iter().map(|(field, error)| (*field, *error))
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "clean": self.clean,
            "errors": self.errors,
            "codes": self.failures.iter().map(|(field, error)| {
                (field.error_key(), error.code())
            }).collect::<BTreeMap<_, _>>(),
        })
    }
}

/// Form validator configured with a policy and a message table.
///
/// Holds no per-call state; one instance can serve any number of threads.
///
/// ```
/// use payform_validation::{ChecksumPolicy, FormValidator, PaymentForm, ValidationPolicy, YearMonth};
///
/// let validator = FormValidator::new()
///     .with_policy(ValidationPolicy::default().with_checksum(ChecksumPolicy::Advisory));
///
/// let form = PaymentForm::new("4111 1111 1111 1112", "08/29", "123", "Ada Lovelace", "ada@example.org");
/// let report = validator.validate(&form, YearMonth::new(2026, 1));
///
/// assert!(report.is_valid());
/// assert_eq!(report.clean["card"], "4111111111111112");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    policy: ValidationPolicy,
    messages: MessageCatalog,
}

impl FormValidator {
    /// Create a validator with the default policy and English messages
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validation policy
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the message table
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Get the validation policy
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate every field of `form` with `as_of` as the current month
    pub fn validate(&self, form: &PaymentForm, as_of: YearMonth) -> ValidationReport {
        let mut report = ValidationReport::default();

        for field in Field::ALL {
            let outcome = self.validate_field(field, form, as_of);
            report.record(field, outcome, &self.messages);
        }

        if report.is_valid() {
            payform_log::debug!(target: "payform::form", "form accepted");
        } else {
            let rejected: Vec<&str> = report.failures().map(|(f, _)| f.error_key()).collect();
            payform_log::debug!(
                target: "payform::form",
                "form rejected: {}",
                rejected.join(", ")
            );
        }

        report
    }

    /// Validate against the current UTC month
    pub fn validate_now(&self, form: &PaymentForm) -> ValidationReport {
        self.validate(form, YearMonth::current())
    }

    fn validate_field(&self, field: Field, form: &PaymentForm, as_of: YearMonth) -> FieldOutcome {
        match field {
            Field::CardNumber => {
                validate_card_number_with(&form.card_number, self.policy.checksum).into()
            }
            Field::ExpDate => {
                validate_exp_date_with(&form.exp_date, as_of, self.policy.max_years_ahead).into()
            }
            Field::Cvv => validate_cvv(&form.cvv).into(),
            Field::NameOnCard => validate_name_on_card(&form.name_on_card).into(),
            Field::BillingEmail => validate_billing_email(&form.billing_email).into(),
        }
    }
}

/// Validate a payment form with the default policy and English messages.
///
/// ```
/// use payform_validation::{validate_form, YearMonth};
///
/// let report = validate_form("4111111111111111", "13/26", "12", "Ada", "ada@example.org", YearMonth::new(2026, 1));
///
/// assert_eq!(report.clean["card"], "4111111111111111");
/// assert_eq!(report.clean["exp_date"], "");
/// assert!(report.errors.contains_key("exp_date"));
/// assert!(report.errors.contains_key("cvv"));
/// assert!(!report.clean.contains_key("cvv"));
/// ```
pub fn validate_form(
    card_number: &str,
    exp_date: &str,
    cvv: &str,
    name_on_card: &str,
    billing_email: &str,
    as_of: YearMonth,
) -> ValidationReport {
    let form = PaymentForm::new(card_number, exp_date, cvv, name_on_card, billing_email);
    FormValidator::new().validate(&form, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardNumberError, CvvError, ExpDateError, NameError};

    const JAN_2026: YearMonth = YearMonth { year: 2026, month: 1 };

    fn valid_form() -> PaymentForm {
        PaymentForm::new(
            "4111 1111 1111 1111",
            "01/26",
            "123",
            "  José   O'Brien-Smith  ",
            "  USER@Example.COM ",
        )
    }

    #[test]
    fn test_key_table_matches_field_order() {
        for (index, field) in Field::ALL.iter().enumerate() {
            assert_eq!(FIELD_KEYS[index].0, *field);
        }
    }

    #[test]
    fn test_key_asymmetry() {
        assert_eq!(Field::CardNumber.error_key(), "card_number");
        assert_eq!(Field::CardNumber.clean_key(), Some("card"));
        assert_eq!(Field::Cvv.clean_key(), None);
    }

    #[test]
    fn test_valid_form() {
        let report = FormValidator::new().validate(&valid_form(), JAN_2026);

        assert!(report.is_valid());
        assert!(report.errors.is_empty());
        assert_eq!(report.clean["card"], "4111111111111111");
        assert_eq!(report.clean["exp_date"], "01/26");
        assert_eq!(report.clean["name_on_card"], "José O'Brien-Smith");
        assert_eq!(report.clean["billing_email"], "user@example.com");
        assert_eq!(report.clean.len(), 4);
    }

    #[test]
    fn test_all_fields_reported() {
        let form = PaymentForm::new("abc", "12/25", "12", "A", "nope");
        let report = FormValidator::new().validate(&form, JAN_2026);

        assert_eq!(report.errors.len(), 5);
        assert_eq!(report.clean.len(), 4);
        assert!(report.clean.values().all(String::is_empty));
        assert_eq!(
            report.failure(Field::CardNumber),
            Some(CardNumberError::NotDigits.into())
        );
        assert_eq!(report.failure(Field::ExpDate), Some(ExpDateError::Expired.into()));
        assert_eq!(report.failure(Field::Cvv), Some(CvvError::InvalidLength.into()));
        assert_eq!(
            report.failure(Field::NameOnCard),
            Some(NameError::EmptyOrTooShort.into())
        );
    }

    #[test]
    fn test_one_failure_keeps_other_clean_values() {
        let mut form = valid_form();
        form.cvv = "12a".to_string();
        let report = FormValidator::new().validate(&form, JAN_2026);

        assert_eq!(report.errors.keys().copied().collect::<Vec<_>>(), vec!["cvv"]);
        assert_eq!(report.errors["cvv"], "the cvv only accepts digits");
        assert_eq!(report.clean["card"], "4111111111111111");
        assert!(!report.is_valid());
    }

    #[test]
    fn test_custom_messages() {
        let validator = FormValidator::new().with_messages(MessageCatalog::spanish());
        let mut form = valid_form();
        form.exp_date = "2026-01".to_string();
        let report = validator.validate(&form, JAN_2026);

        assert_eq!(
            report.errors["exp_date"],
            "Formato de fecha incorrecto. Debe ser MM/YY"
        );
    }

    #[test]
    fn test_policy_horizon_applies() {
        let validator =
            FormValidator::new().with_policy(ValidationPolicy::default().with_max_years_ahead(2));
        let mut form = valid_form();
        form.exp_date = "01/30".to_string();
        let report = validator.validate(&form, JAN_2026);

        assert_eq!(
            report.failure(Field::ExpDate),
            Some(ExpDateError::TooFarFuture.into())
        );
    }

    #[test]
    fn test_to_json() {
        let report = validate_form("", "01/26", "123", "Ada", "ada@example.org", JAN_2026);
        let json = report.to_json();

        assert_eq!(json["clean"]["card"], "");
        assert_eq!(json["clean"]["exp_date"], "01/26");
        assert_eq!(json["codes"]["card_number"], "card_number.not_digits");
        assert!(json["errors"].get("cvv").is_none());
    }

    #[test]
    fn test_form_deserializes_nulls_and_missing() {
        let form: PaymentForm =
            serde_json::from_str(r#"{"card_number": null, "cvv": "123"}"#).unwrap();
        assert_eq!(form.card_number, "");
        assert_eq!(form.exp_date, "");
        assert_eq!(form.cvv, "123");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", valid_form());
        assert!(!debug.contains("4111"));
        assert!(debug.contains("**** **** **** 1111"));
        assert!(!debug.contains("123"));
        assert!(debug.contains("REDACTED"));
    }
}
