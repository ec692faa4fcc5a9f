//! The pagination core: grouping documents by a field, chunking each group
//! into fixed-size pages, and annotating each group's pages with
//! first/previous/next/last navigation. Groups are independent of one
//! another (navigation never crosses a group boundary), and the whole
//! transformation is a pure function of its inputs.

use crate::document::Document;
use crate::keys::extract_keys;
use crate::normalize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// The path template for a paginated group. The two historical layouts are
/// provided as constants; both derive page 0's path without an index segment
/// and later pages with a 1-based segment:
///
/// * [`PathStyle::TAGS`]: `/tags/rust/`, `/tags/rust/2/`, ...
/// * [`PathStyle::AUTHORS`]: `jane`, `jane/2`, ...
///
/// These layouts are part of the persisted site structure and must stay
/// byte-stable across builds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStyle {
    /// Prepended to every page path.
    pub prefix: &'static str,

    /// Whether page paths end with a `/`.
    pub trailing_slash: bool,
}

impl PathStyle {
    /// The tag layout: `/tags/<key>/` for page 0, `/tags/<key>/<n+1>/` after.
    pub const TAGS: PathStyle = PathStyle {
        prefix: "/tags/",
        trailing_slash: true,
    };

    /// The author layout: `<key>` for page 0, `<key>/<n+1>` after.
    pub const AUTHORS: PathStyle = PathStyle {
        prefix: "",
        trailing_slash: false,
    };

    /// Derives the path for one page of a group.
    pub fn page_path(&self, group_key: &str, page_index: usize) -> String {
        let mut path = format!("{}{}", self.prefix, group_key);
        if page_index > 0 {
            path.push('/');
            path.push_str(&(page_index + 1).to_string());
        }
        if self.trailing_slash {
            path.push('/');
        }
        path
    }
}

/// An explicit document ordering passed to the paginator. Callers that want
/// the usual blog presentation pass [`crate::document::newest_first`];
/// relying on pre-sorted input is not part of the contract.
pub type Order = fn(&Document, &Document) -> Ordering;

/// One paginated slice of a group. Built once per run and read-only for the
/// rendering stage; the navigation fields are filled in by [`annotate`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// The normalized key naming the group this page belongs to.
    pub group_key: String,

    /// This page's position within its group, starting at 0.
    pub page_index: usize,

    /// The output path, derived from the group key and page index by
    /// [`PathStyle::page_path`].
    pub path: String,

    /// The documents on this page. Every page holds exactly the configured
    /// page size except possibly the last page of its group.
    pub items: Vec<Document>,

    /// The number of pages in this page's group.
    pub total_pages: usize,

    /// The page index of the group's last page.
    pub last_index: usize,

    /// The path of the group's first page.
    pub first: String,

    /// The path of the group's last page.
    pub last: String,

    /// The path of the preceding page, absent on page 0.
    pub previous: Option<String>,

    /// The path of the following page, absent on the group's last page.
    pub next: Option<String>,
}

/// Groups documents by a field and chunks each group into [`Page`]s.
/// Mirrors the shape of a writer-style configuration struct: public knobs,
/// one method that does the work.
pub struct Paginator<'a> {
    /// The document field to group by (e.g. `tags`, `author`).
    pub field: &'a str,

    /// The number of documents per page. Must be at least 1.
    pub page_size: usize,

    /// The path template for the produced pages.
    pub style: PathStyle,

    /// The presentation order applied before chunking.
    pub order: Order,
}

impl Paginator<'_> {
    /// Builds the full page set for every group the field yields, in
    /// collated key order, each group annotated with navigation.
    ///
    /// Each document with a non-empty field value lands on exactly one page
    /// of each group it normalizes into. A group with no members produces no
    /// pages. A page size of zero is an error, the one contract violation
    /// this function can surface.
    pub fn paginate(&self, documents: &[Document]) -> Result<Vec<Page>> {
        if self.page_size == 0 {
            return Err(Error::InvalidPageSize);
        }

        let mut ordered: Vec<&Document> = documents.iter().collect();
        ordered.sort_by(|a, b| (self.order)(a, b));

        let mut pages = Vec::new();
        let mut seen = HashSet::new();
        for key in extract_keys(documents, self.field) {
            let group_key = normalize::group_key(&key);

            // Distinct extracted keys can collapse to one group key once
            // deburred; the group is built once.
            if !seen.insert(group_key.clone()) {
                continue;
            }

            let members: Vec<&Document> = ordered
                .iter()
                .filter(|d| {
                    d.field_values(self.field)
                        .iter()
                        .any(|v| normalize::group_key(v) == group_key)
                })
                .cloned()
                .collect();
            if members.is_empty() {
                continue;
            }

            let mut group: Vec<Page> = members
                .chunks(self.page_size)
                .enumerate()
                .map(|(i, chunk)| Page {
                    group_key: group_key.clone(),
                    page_index: i,
                    path: self.style.page_path(&group_key, i),
                    items: chunk.iter().map(|d| (*d).clone()).collect(),
                    ..Page::default()
                })
                .collect();
            annotate(&mut group);
            pages.extend(group);
        }

        Ok(pages)
    }
}

/// Fills in the navigation fields for one group's pages, which must be in
/// page-index order. `first` and `last` point at the group's boundary pages,
/// `previous`/`next` at the positional neighbors where they exist. Never
/// call this with pages from more than one group.
pub fn annotate(pages: &mut [Page]) {
    let len = pages.len();
    if len == 0 {
        return;
    }

    let first = pages[0].path.clone();
    let last = pages[len - 1].path.clone();
    for i in 0..len {
        pages[i].total_pages = len;
        pages[i].last_index = len - 1;
        pages[i].first = first.clone();
        pages[i].last = last.clone();
        pages[i].previous = if i > 0 {
            Some(pages[i - 1].path.clone())
        } else {
            None
        };
        pages[i].next = if i + 1 < len {
            Some(pages[i + 1].path.clone())
        } else {
            None
        };
    }
}

/// The result of a pagination operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a pagination contract violation.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when the configured page size is zero. Chunking by zero
    /// would never terminate, so this fails before any work happens.
    InvalidPageSize,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidPageSize => {
                write!(f, "Page size must be at least 1")
            }
        }
    }
}

impl std::error::Error for Error {}
