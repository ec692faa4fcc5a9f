//! Key normalization. Grouping keys are compared and deduplicated in a
//! normalized form so that e.g. `macOS` and `MacOS` resolve to the same
//! group, and so accented variants land in the same slug-safe output path.

use std::cmp::Ordering;

/// Locale-invariant lowercasing. This is the deduplication form for key
/// extraction: values that casefold equal are one key.
pub fn casefold(s: &str) -> String {
    s.to_lowercase()
}

/// Strips diacritics by transliterating to ASCII (`é` becomes `e`).
/// Separators and casing pass through untouched, so a deburred key is
/// byte-identical to its source except for the accented characters.
pub fn deburr(s: &str) -> String {
    deunicode::deunicode(s)
}

/// The canonical group-key form: deburred, then casefolded. Group keys are
/// dropped into output paths, so this must produce the same bytes for every
/// run.
pub fn group_key(s: &str) -> String {
    deburr(s).to_lowercase()
}

/// Orders keys the way a base-sensitivity lexicographic comparison would:
/// case and accent differences don't affect the primary ordering, and the
/// raw bytes break ties so the result is fully deterministic.
pub fn collate(a: &str, b: &str) -> Ordering {
    group_key(a)
        .cmp(&group_key(b))
        .then_with(|| a.cmp(b))
}
