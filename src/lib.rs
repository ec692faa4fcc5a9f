//! The library code for the `quire` site configuration module. A host
//! static-site framework supplies an in-memory collection of documents and
//! asks this crate, by name, for the collections and filters to render its
//! templates with. The interesting work is building the paginated tag and
//! author indexes, which breaks down into three steps:
//!
//! 1. Extracting the set of grouping keys a field takes across the
//!    documents ([`crate::keys`])
//! 2. Partitioning the documents into groups and chunking each group into
//!    fixed-size pages ([`crate::paginate`])
//! 3. Annotating each group's pages with first/previous/next/last
//!    navigation ([`crate::paginate::annotate`])
//!
//! Keys are compared in a normalized form ([`crate::normalize`]) so that
//! case and accent variants of a tag or author name land in one group with
//! one slug-safe output path. Everything is a pure function of the document
//! list: building twice from the same documents produces identical pages.
//!
//! The host boundary has two halves. Documents come in through the
//! [`crate::document::Source`] trait (filter-by-glob, filter-by-tag, get
//! all); collections and filters go out through a [`crate::registry`] the
//! host consults by name, with values crossing into template space via
//! [`crate::value`]. Rendering, markdown, and all file I/O stay on the
//! host's side of that line.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod document;
pub mod filters;
pub mod keys;
pub mod normalize;
pub mod paginate;
pub mod registry;
pub mod value;
