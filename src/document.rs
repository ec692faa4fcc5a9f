//! Defines the [`Document`] type and the [`Source`] boundary through which
//! the host framework hands documents to this crate. A [`Document`] is an
//! opaque content record: a source path, a publish date, and a map of named
//! front-matter fields. The crate never parses source files itself; the host
//! materializes documents and exposes them through the three [`Source`]
//! queries.

use serde::Deserialize;
use serde_yaml::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A content record supplied by the host framework. The `data` map holds the
/// document's named fields (e.g. `tags` as a sequence of strings, `author`
/// as a string). Documents are immutable once handed to this crate.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Document {
    /// The source path of the document, matched by [`Source::filtered_by_glob`].
    #[serde(default)]
    pub path: String,

    /// The publish date in `YYYY-MM-DD` form. String comparison on this
    /// format is date comparison, which is what [`newest_first`] relies on.
    #[serde(default)]
    pub date: String,

    /// Named front-matter fields.
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
}

impl Document {
    /// Returns the raw value of a named field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Returns the string values a field contributes: a string scalar
    /// contributes itself, a sequence contributes each string element
    /// (flattened one level), and a missing field contributes nothing.
    /// Empty strings and non-string elements also contribute nothing.
    pub fn field_values(&self, name: &str) -> Vec<&str> {
        match self.data.get(name) {
            Some(Value::String(s)) if !s.is_empty() => vec![s.as_str()],
            Some(Value::Sequence(seq)) => seq
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Orders documents newest-first by their `date` field, falling back to the
/// source path so that equal dates order deterministically. Collections are
/// presented reverse-chronologically; pagination callers pass this (or their
/// own ordering) explicitly rather than relying on pre-sorted input.
pub fn newest_first(a: &Document, b: &Document) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path))
}

/// The host-supplied document provider. These are the only query shapes the
/// crate depends on; each returns documents in the provider's source order.
pub trait Source {
    /// Returns the documents whose source path matches a glob pattern.
    fn filtered_by_glob(&self, pattern: &str) -> Vec<Document>;

    /// Returns the documents carrying the given raw (un-normalized) tag.
    fn filtered_by_tag(&self, tag: &str) -> Vec<Document>;

    /// Returns every document.
    fn all(&self) -> Vec<Document>;
}

/// An in-memory [`Source`] over a list of documents. Hosts with their own
/// document stores implement [`Source`] directly; this one exists for hosts
/// that already hold documents in memory, and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    pub documents: Vec<Document>,
}

impl MemorySource {
    pub fn new(documents: Vec<Document>) -> MemorySource {
        MemorySource { documents }
    }
}

impl Source for MemorySource {
    fn filtered_by_glob(&self, pattern: &str) -> Vec<Document> {
        self.documents
            .iter()
            .filter(|d| glob_match(pattern, &d.path))
            .cloned()
            .collect()
    }

    fn filtered_by_tag(&self, tag: &str) -> Vec<Document> {
        self.documents
            .iter()
            .filter(|d| d.field_values("tags").contains(&tag))
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<Document> {
        self.documents.clone()
    }
}

/// Matches a path against a glob pattern where `*` matches any run of
/// characters. Leading `./` is ignored on both sides, so the patterns
/// `_src/posts/*.md` and `./src/blogposts/*.md` behave as the host's glob
/// filter would treat them.
fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern = pattern.trim_start_matches("./");
    let path = path.trim_start_matches("./");

    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == path;
    }

    // The first and last fragments anchor to the ends of the path; middle
    // fragments match greedily left to right.
    if !path.starts_with(parts[0]) {
        return false;
    }
    let mut rest = &path[parts[0].len()..];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(i) => rest = &rest[i + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(parts[parts.len() - 1])
}
