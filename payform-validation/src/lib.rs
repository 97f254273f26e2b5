//! Payment form validation for Payform
//!
//! Validates and normalizes the five fields of a card payment form and
//! produces a sanitized record plus a per-field error report. Everything
//! here is pure and synchronous: no I/O, no clock reads unless asked for,
//! no shared mutable state.
//!
//! # Examples
//!
//! ## Validating a form
//!
//! ```
//! use payform_validation::{validate_form, YearMonth};
//!
//! let report = validate_form(
//!     "4111 1111-1111 1111",
//!     "01/26",
//!     "123",
//!     "  José   O'Brien-Smith  ",
//!     "  USER@Example.COM ",
//!     YearMonth::new(2026, 1),
//! );
//!
//! assert!(report.errors.is_empty());
//! assert_eq!(report.clean["card"], "4111111111111111");
//! assert_eq!(report.clean["name_on_card"], "José O'Brien-Smith");
//! assert_eq!(report.clean["billing_email"], "user@example.com");
//! ```
//!
//! ## Single fields
//!
//! ```
//! use payform_validation::{validate_cvv, validate_name_on_card, CvvError, NameError};
//!
//! assert!(validate_cvv("123").is_ok());
//! assert_eq!(validate_cvv("12"), Err(CvvError::InvalidLength));
//! assert_eq!(validate_name_on_card("A1"), Err(NameError::IllegalCharacter));
//! ```
//!
//! ## Policy and messages
//!
//! ```
//! use payform_validation::{FormValidator, MessageCatalog, PaymentForm, ValidationPolicy, YearMonth};
//!
//! let validator = FormValidator::new()
//!     .with_policy(ValidationPolicy::from_toml_str("max_years_ahead = 10").unwrap())
//!     .with_messages(MessageCatalog::spanish());
//!
//! let form = PaymentForm::new("4111111111111111", "01/40", "123", "Ada Lovelace", "ada@example.org");
//! let report = validator.validate(&form, YearMonth::new(2026, 1));
//!
//! assert_eq!(report.errors["exp_date"], "la fecha de vencimiento es demasiado lejana");
//! ```

mod checksum;
mod config;
mod errors;
mod expiry;
mod form;
mod messages;
mod normalize;
mod validators;

pub use checksum::*;
pub use config::*;
pub use errors::*;
pub use expiry::*;
pub use form::*;
pub use messages::*;
pub use normalize::*;
pub use validators::*;
