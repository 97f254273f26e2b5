//! Fuzz target for card number validation.
//!
//! Accepted numbers must be bare ASCII digits that pass the checksum and
//! validate to themselves again.

#![no_main]

use libfuzzer_sys::fuzz_target;
use payform_validation::{luhn_valid, parse_digits, validate_card_number};

fuzz_target!(|raw: &str| {
    if let Ok(card) = validate_card_number(raw) {
        let digits = parse_digits(&card).expect("accepted card must be digits");
        assert!((13..=19).contains(&digits.len()));
        assert!(luhn_valid(&digits));
        assert_eq!(validate_card_number(&card), Ok(card.clone()));
    }
});
