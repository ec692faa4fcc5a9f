//! The host-facing configuration surface. The host framework asks for this
//! crate's collections and filters by name; [`configure`] registers all of
//! them on a [`SiteConfig`] and returns the build [`Options`]. Collections
//! are plain function pointers over the [`Source`] boundary; all state
//! lives in the registry the host owns, never in the functions themselves.

use crate::document::{newest_first, Document, Source};
use crate::filters;
use crate::keys::extract_keys;
use crate::normalize;
use crate::paginate::{self, Paginator, PathStyle};
use gtmpl_derive::Gtmpl;
use gtmpl_value::{Func, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// The number of posts on each paginated page, for the whole build.
pub const POSTS_PER_PAGINATED_PAGE: usize = 3;

/// The glob that selects the main post collection.
pub const POSTS_GLOB: &str = "_src/posts/*.md";

/// The glob that selects the legacy blogposts collection. The divergent
/// prefix is historical and load-bearing: hosts that still carry documents
/// under `src/blogposts` expect this exact pattern.
pub const BLOGPOSTS_GLOB: &str = "./src/blogposts/*.md";

/// A named collection: a pure function from the host's document source to a
/// template value. Fallible so that pagination contract violations abort the
/// host's build step instead of emitting partial output.
pub type Collection = fn(&dyn Source) -> paginate::Result<Value>;

/// The registry the host consults by name. Iteration order is the name
/// order, so registration output is deterministic.
#[derive(Default)]
pub struct SiteConfig {
    collections: BTreeMap<String, Collection>,
    filters: BTreeMap<String, Func>,
    passthrough_copies: Vec<(String, String)>,
}

impl SiteConfig {
    pub fn new() -> SiteConfig {
        SiteConfig::default()
    }

    /// Registers a named collection. A later registration under the same
    /// name replaces the earlier one.
    pub fn add_collection(&mut self, name: &str, collection: Collection) {
        self.collections.insert(name.to_owned(), collection);
    }

    /// Registers a named filter.
    pub fn add_filter(&mut self, name: &str, filter: Func) {
        self.filters.insert(name.to_owned(), filter);
    }

    /// Records a source-to-target copy mapping for the host to perform. The
    /// crate never touches the filesystem; this is registration only.
    pub fn add_passthrough_copy(&mut self, source: &str, target: &str) {
        self.passthrough_copies
            .push((source.to_owned(), target.to_owned()));
    }

    /// Looks up a collection by name.
    pub fn collection(&self, name: &str) -> Option<Collection> {
        self.collections.get(name).copied()
    }

    /// Looks up a filter by name.
    pub fn filter(&self, name: &str) -> Option<Func> {
        self.filters.get(name).copied()
    }

    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.keys().map(String::as_str).collect()
    }

    pub fn passthrough_copies(&self) -> &[(String, String)] {
        &self.passthrough_copies
    }

    /// Installs every registered filter on a template, making them callable
    /// from template text by their registered names.
    pub fn install_filters(&self, template: &mut gtmpl::Template) {
        for (name, filter) in &self.filters {
            template.add_func(name, *filter);
        }
    }
}

/// The options handed back to the host after registration: where content
/// lives, where output goes, and which template formats are in play.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub template_formats: Vec<String>,
}

/// Registers every collection, filter, and passthrough copy this crate
/// provides, and returns the host [`Options`]. This is the crate's entry
/// point for hosts; everything it wires up is also public for hosts that
/// want to cherry-pick.
pub fn configure(config: &mut SiteConfig) -> Options {
    config.add_passthrough_copy("_src/assets", "assets");
    config.add_passthrough_copy("_src/static", ".");

    config.add_collection("posts", posts);
    config.add_collection("blogposts", blogposts);
    config.add_collection("pagedTags", paged_tags);
    config.add_collection("authorPosts", author_posts);
    config.add_collection("pagedAuthorPosts", paged_author_posts);
    config.add_collection("tagList", tag_list);

    config.add_filter("readableDate", filters::readable_date);
    config.add_filter("getAuthor", filters::get_author);
    config.add_filter("getPostsByAuthor", filters::get_posts_by_author);
    config.add_filter("head", filters::head);
    config.add_filter("isArray", filters::is_array);
    config.add_filter("makeArray", filters::make_array);

    Options {
        input: PathBuf::from("_src"),
        output: PathBuf::from("_dist"),
        template_formats: vec!["md".to_owned(), "njk".to_owned(), "html".to_owned()],
    }
}

/// An `authorPosts` entry: the display title and the slug matching the
/// author's paginated page paths.
#[derive(Gtmpl, Clone, Debug, PartialEq)]
pub struct AuthorSlug {
    pub title: String,
    pub slug: String,
}

fn documents_to_value(documents: &[Document]) -> Value {
    Value::Array(documents.iter().map(Value::from).collect())
}

/// The main post collection, newest first.
fn posts(source: &dyn Source) -> paginate::Result<Value> {
    let mut posts = source.filtered_by_glob(POSTS_GLOB);
    posts.sort_by(newest_first);
    Ok(documents_to_value(&posts))
}

/// The legacy blogposts collection, newest first.
fn blogposts(source: &dyn Source) -> paginate::Result<Value> {
    let mut posts = source.filtered_by_glob(BLOGPOSTS_GLOB);
    posts.sort_by(newest_first);
    Ok(documents_to_value(&posts))
}

/// Posts grouped by tag and chunked into `/tags/<tag>/` pages.
fn paged_tags(source: &dyn Source) -> paginate::Result<Value> {
    let paginator = Paginator {
        field: "tags",
        page_size: POSTS_PER_PAGINATED_PAGE,
        style: PathStyle::TAGS,
        order: newest_first,
    };
    let pages = paginator.paginate(&source.filtered_by_glob(POSTS_GLOB))?;
    Ok(Value::Array(pages.iter().map(Value::from).collect()))
}

/// One `{title, slug}` record per distinct author. The slug is the
/// normalized group key, so it is byte-equal to the author's page-0 path
/// from [`paged_author_posts`].
fn author_posts(source: &dyn Source) -> paginate::Result<Value> {
    let posts = source.filtered_by_glob(POSTS_GLOB);
    let records: Vec<Value> = extract_keys(&posts, "author")
        .into_iter()
        .map(|key| {
            Value::from(AuthorSlug {
                slug: normalize::group_key(&key),
                title: key,
            })
        })
        .collect();
    Ok(Value::Array(records))
}

/// Posts grouped by author and chunked into `<author>` pages.
fn paged_author_posts(source: &dyn Source) -> paginate::Result<Value> {
    let paginator = Paginator {
        field: "author",
        page_size: POSTS_PER_PAGINATED_PAGE,
        style: PathStyle::AUTHORS,
        order: newest_first,
    };
    let pages = paginator.paginate(&source.filtered_by_glob(POSTS_GLOB))?;
    Ok(Value::Array(pages.iter().map(Value::from).collect()))
}

/// Every raw tag value across every document, deduplicated and sorted.
fn tag_list(source: &dyn Source) -> paginate::Result<Value> {
    let mut tags = BTreeSet::new();
    for document in source.all() {
        for tag in document.field_values("tags") {
            tags.insert(tag.to_owned());
        }
    }
    Ok(Value::Array(tags.into_iter().map(Value::from).collect()))
}
