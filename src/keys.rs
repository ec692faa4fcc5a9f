//! Key extraction: discovering the set of values a field takes across a
//! document list. This is the first step of pagination: the extracted keys
//! name the groups that get chunked into pages.

use crate::document::Document;
use crate::normalize;
use std::collections::BTreeSet;

/// Returns the sorted, deduplicated, casefolded set of values `field` takes
/// across `documents`. Scalar values contribute themselves, sequences
/// contribute each element, and missing fields contribute nothing. The
/// result is ordered by [`normalize::collate`], so case and accent variants
/// sort together. Pure and deterministic for a given document list.
pub fn extract_keys(documents: &[Document], field: &str) -> Vec<String> {
    let mut set = BTreeSet::new();
    for document in documents {
        for value in document.field_values(field) {
            set.insert(normalize::casefold(value));
        }
    }

    let mut keys: Vec<String> = set.into_iter().collect();
    keys.sort_by(|a, b| normalize::collate(a, b));
    keys
}

#[cfg(test)]
mod test {
    use super::*;

    fn doc(yaml: &str) -> Document {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_case_variants_deduplicate() {
        let docs = vec![
            doc("{path: a.md, data: {tags: [Go]}}"),
            doc("{path: b.md, data: {tags: [go]}}"),
            doc("{path: c.md, data: {tags: [GO]}}"),
        ];
        assert_eq!(vec!["go"], extract_keys(&docs, "tags"));
    }

    #[test]
    fn test_scalar_and_sequence_values_mix() {
        let docs = vec![
            doc("{path: a.md, data: {tags: rust}}"),
            doc("{path: b.md, data: {tags: [blog, rust]}}"),
        ];
        assert_eq!(vec!["blog", "rust"], extract_keys(&docs, "tags"));
    }

    #[test]
    fn test_missing_field_contributes_nothing() {
        let docs = vec![
            doc("{path: a.md, data: {author: jane}}"),
            doc("{path: b.md, data: {}}"),
        ];
        assert_eq!(vec!["jane"], extract_keys(&docs, "author"));
    }

    #[test]
    fn test_ordering_is_base_sensitive() {
        let docs = vec![
            doc("{path: a.md, data: {author: Zoe}}"),
            doc("{path: b.md, data: {author: Émile}}"),
            doc("{path: c.md, data: {author: earl}}"),
        ];
        assert_eq!(
            vec!["earl", "émile", "zoe"],
            extract_keys(&docs, "author")
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keys(&[], "tags").is_empty());
    }
}
