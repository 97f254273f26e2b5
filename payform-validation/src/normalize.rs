// Text normalization
//
// Two distinct paths: `normalize_ascii` folds to printable ASCII and is only
// meant for fields compared digit by digit. Names and emails go through the
// accent-preserving functions so legal letters like `é` survive.

use unicode_normalization::UnicodeNormalization;

/// NFKD, lowercase, drop anything outside printable ASCII, trim.
///
/// Accented letters lose their marks (`é` becomes `e`) and compatibility
/// forms fold to their plain equivalents (full-width `４` becomes `4`).
///
/// ```
/// use payform_validation::normalize_ascii;
///
/// assert_eq!(normalize_ascii("  José\t"), "jose");
/// assert_eq!(normalize_ascii("４１１１"), "4111");
/// assert_eq!(normalize_ascii(""), "");
/// ```
pub fn normalize_ascii(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .flat_map(char::to_lowercase)
        .filter(|c| (' '..='~').contains(c))
        .collect();

    folded.trim().to_string()
}

/// NFC, trim and lowercase. Accents are kept.
pub fn fold_case(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    composed.trim().to_lowercase()
}

/// NFC, trim and collapse interior whitespace. Case is kept as given.
///
/// ```
/// use payform_validation::normalize_name;
///
/// assert_eq!(normalize_name("  José   O'Brien  "), "José O'Brien");
/// // decomposed input is composed back
/// assert_eq!(normalize_name("Jose\u{301}"), "José");
/// ```
pub fn normalize_name(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    collapse_whitespace(&composed)
}

/// Replace every run of whitespace with a single space and trim both ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
