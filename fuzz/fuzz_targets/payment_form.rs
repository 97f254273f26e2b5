//! Fuzz target for form validation.
//!
//! Any five strings must produce a well-formed report without panicking.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use payform_validation::{Field, YearMonth, validate_form};

/// Arbitrary form submission for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzForm {
    card_number: String,
    exp_date: String,
    cvv: String,
    name_on_card: String,
    billing_email: String,
    year: u16,
    month: u8,
}

fuzz_target!(|input: FuzzForm| {
    let as_of = YearMonth::new(i32::from(input.year), u32::from(input.month % 12) + 1);
    let report = validate_form(
        &input.card_number,
        &input.exp_date,
        &input.cvv,
        &input.name_on_card,
        &input.billing_email,
        as_of,
    );

    assert_eq!(report.clean.len(), 4);
    assert!(!report.clean.contains_key("cvv"));

    for field in Field::ALL {
        let rejected = report.errors.contains_key(field.error_key());
        assert_eq!(rejected, report.failure(field).is_some());

        if let (Some(key), true) = (field.clean_key(), rejected) {
            assert!(report.clean[key].is_empty());
        }
    }
});
