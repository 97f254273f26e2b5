// Luhn mod-10 checksum

/// Check a digit sequence with the Luhn algorithm.
///
/// Every second digit counting from the right is doubled, with 9 subtracted
/// when the result exceeds 9. The sequence is valid when the total is a
/// multiple of 10. Which positions get doubled is fixed by the sequence
/// length, so the rightmost digit is never doubled.
///
/// Returns `false` for an empty sequence or any value above 9.
///
/// ```
/// use payform_validation::{luhn_valid, parse_digits};
///
/// let digits = parse_digits("4111111111111111").unwrap();
/// assert!(luhn_valid(&digits));
/// assert!(!luhn_valid(&[]));
/// ```
pub fn luhn_valid(digits: &[u8]) -> bool {
    if digits.is_empty() || digits.iter().any(|&d| d > 9) {
        return false;
    }

    luhn_sum(digits, digits.len() % 2) % 10 == 0
}

/// The digit that makes `payload` followed by it pass [`luhn_valid`].
///
/// Returns `None` for an empty payload or any value above 9.
pub fn luhn_check_digit(payload: &[u8]) -> Option<u8> {
    if payload.is_empty() || payload.iter().any(|&d| d > 9) {
        return None;
    }

    // with the check digit appended the total length is payload.len() + 1
    let sum = luhn_sum(payload, (payload.len() + 1) % 2);
    Some(((10 - sum % 10) % 10) as u8)
}

/// Parse ASCII decimal digits into their values.
///
/// Returns `None` on an empty string or any other character.
pub fn parse_digits(value: &str) -> Option<Vec<u8>> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(value.bytes().map(|b| b - b'0').collect())
}

fn luhn_sum(digits: &[u8], parity: usize) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == parity {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum()
}
