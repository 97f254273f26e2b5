// Payform - payment form sanitization
//
// Validates the five fields of a card payment form and reports clean values
// and per-field errors. See `payform_validation` for the field rules.

// Re-export validation
pub use payform_validation::*;

// Re-export logging under its own path so its macros don't shadow anything
pub use payform_log as log;
