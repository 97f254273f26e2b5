// Field validators
//
// Each validator runs its checks in a fixed order and stops at the first
// failure, so the reported error for a given input never changes.

use crate::{
    CardNumberError, ChecksumPolicy, CvvError, DEFAULT_MAX_YEARS_AHEAD, EmailError, ExpDateError,
    ExpiryStatus, FieldError, NameError, YearMonth, check_expiry, fold_case, luhn_valid,
    normalize_ascii, normalize_name, parse_digits,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Normalized inputs above this many bytes are rejected before pattern matching.
pub const MAX_INPUT_LEN: usize = 1024;

pub const CARD_MIN_DIGITS: usize = 13;
pub const CARD_MAX_DIGITS: usize = 19;
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 60;
pub const EMAIL_MAX_CHARS: usize = 254;

static EXP_DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})$").unwrap());

// Latin script letters only; × and ÷ are Common script
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{Latin}' -]+$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").unwrap());

/// Validate a card number.
///
/// Checks, in order: digits only once spaces and hyphens are removed,
/// 13 to 19 digits, Luhn checksum. Returns the bare digits.
///
/// ```
/// use payform_validation::validate_card_number;
///
/// assert_eq!(validate_card_number("4111 1111-1111 1111").unwrap(), "4111111111111111");
/// ```
pub fn validate_card_number(raw: &str) -> Result<String, CardNumberError> {
    validate_card_number_with(raw, ChecksumPolicy::Enforce)
}

/// Validate a card number with an explicit checksum policy
pub fn validate_card_number_with(
    raw: &str,
    checksum: ChecksumPolicy,
) -> Result<String, CardNumberError> {
    let card: String = normalize_ascii(raw)
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if card.len() > MAX_INPUT_LEN {
        return Err(CardNumberError::InvalidLength);
    }

    let digits = parse_digits(&card).ok_or(CardNumberError::NotDigits)?;

    if !(CARD_MIN_DIGITS..=CARD_MAX_DIGITS).contains(&digits.len()) {
        return Err(CardNumberError::InvalidLength);
    }

    if !luhn_valid(&digits) {
        match checksum {
            ChecksumPolicy::Enforce => return Err(CardNumberError::FailedChecksum),
            ChecksumPolicy::Advisory => {
                payform_log::warn!(
                    target: "payform::card",
                    "card ending in {} failed checksum, accepted under advisory policy",
                    payform_log::last_four(&card)
                );
            }
        }
    }

    Ok(card)
}

/// Validate an `MM/YY` expiration date against the month `as_of`.
///
/// Checks, in order: shape, month in 01..=12, not expired, not more than
/// 15 years ahead. Two-digit years map to 20YY.
///
/// ```
/// use payform_validation::{validate_exp_date, ExpDateError, YearMonth};
///
/// let as_of = YearMonth::new(2026, 1);
/// assert_eq!(validate_exp_date("01/26", as_of).unwrap(), "01/26");
/// assert_eq!(validate_exp_date("12/25", as_of), Err(ExpDateError::Expired));
/// ```
pub fn validate_exp_date(raw: &str, as_of: YearMonth) -> Result<String, ExpDateError> {
    validate_exp_date_with(raw, as_of, DEFAULT_MAX_YEARS_AHEAD)
}

/// Validate an expiration date with an explicit horizon in years
pub fn validate_exp_date_with(
    raw: &str,
    as_of: YearMonth,
    max_years_ahead: u32,
) -> Result<String, ExpDateError> {
    let exp_date = normalize_ascii(raw);
    if exp_date.len() > MAX_INPUT_LEN {
        return Err(ExpDateError::BadFormat);
    }

    let captures = EXP_DATE_REGEX
        .captures(&exp_date)
        .ok_or(ExpDateError::BadFormat)?;

    // both groups are exactly two ASCII digits
    let month: u32 = captures[1].parse().map_err(|_| ExpDateError::BadFormat)?;
    let year: i32 = captures[2].parse().map_err(|_| ExpDateError::BadFormat)?;

    if !(1..=12).contains(&month) {
        return Err(ExpDateError::BadMonth);
    }

    match check_expiry(month, 2000 + year, as_of, max_years_ahead) {
        ExpiryStatus::Valid => Ok(exp_date),
        ExpiryStatus::Expired => Err(ExpDateError::Expired),
        ExpiryStatus::TooFarFuture => Err(ExpDateError::TooFarFuture),
    }
}

/// Validate a CVV.
///
/// Checks, in order: digits only, 3 or 4 digits. Surrounding whitespace is
/// ignored. The value itself is never returned.
pub fn validate_cvv(raw: &str) -> Result<(), CvvError> {
    let cvv = raw.trim();
    if cvv.len() > MAX_INPUT_LEN {
        return Err(CvvError::InvalidLength);
    }

    if cvv.is_empty() || !cvv.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CvvError::NotDigits);
    }

    if !(3..=4).contains(&cvv.len()) {
        return Err(CvvError::InvalidLength);
    }

    Ok(())
}

/// Validate the cardholder name.
///
/// Checks, in order: 2 to 60 characters once trimmed and whitespace
/// collapsed, then letters (accented Latin included), spaces, apostrophes
/// and hyphens only. The name keeps the case it was typed in.
///
/// ```
/// use payform_validation::validate_name_on_card;
///
/// assert_eq!(
///     validate_name_on_card("  José   O'Brien-Smith  ").unwrap(),
///     "José O'Brien-Smith"
/// );
/// ```
pub fn validate_name_on_card(raw: &str) -> Result<String, NameError> {
    let name = normalize_name(raw);
    let length = name.chars().count();

    if length < NAME_MIN_CHARS {
        return Err(NameError::EmptyOrTooShort);
    }

    if length > NAME_MAX_CHARS {
        return Err(NameError::TooLong);
    }

    if !NAME_REGEX.is_match(&name) {
        return Err(NameError::IllegalCharacter);
    }

    Ok(name)
}

/// Validate the billing email.
///
/// Checks, in order: at most 254 characters once trimmed and lowercased,
/// then a conservative `local@domain.tld` shape.
///
/// ```
/// use payform_validation::validate_billing_email;
///
/// assert_eq!(validate_billing_email("  USER@Example.COM ").unwrap(), "user@example.com");
/// ```
pub fn validate_billing_email(raw: &str) -> Result<String, EmailError> {
    let email = fold_case(raw);

    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err(EmailError::TooLong);
    }

    if !EMAIL_REGEX.is_match(&email) {
        return Err(EmailError::MalformedAddress);
    }

    Ok(email)
}

/// A validator's `(clean value, error)` pair.
///
/// `clean` is empty whenever `error` is set, and always empty for the CVV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOutcome {
    pub clean: String,
    pub error: Option<FieldError>,
}

impl FieldOutcome {
    /// Whether the field passed validation
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Split into `(clean, message)` using the built-in English text.
    ///
    /// `message` is empty on success.
    pub fn into_pair(self) -> (String, String) {
        let message = self.error.map(|e| e.to_string()).unwrap_or_default();
        (self.clean, message)
    }
}

impl<E: Into<FieldError>> From<Result<String, E>> for FieldOutcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(clean) => Self { clean, error: None },
            Err(e) => Self {
                clean: String::new(),
                error: Some(e.into()),
            },
        }
    }
}

impl From<Result<(), CvvError>> for FieldOutcome {
    fn from(result: Result<(), CvvError>) -> Self {
        Self {
            clean: String::new(),
            error: result.err().map(FieldError::from),
        }
    }
}
