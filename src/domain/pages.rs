//! Page inventory records produced by the database listing phase.

use serde::Serialize;

/// Fixed-schema metadata header for published pages.
///
/// Declaration order is the serialization order of the emitted JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Frontmatter {
    pub categories: Vec<String>,
    pub date: String,
    pub tags: Vec<String>,
    pub title: String,
    pub url: String,
    pub published: bool,
}

/// One unit of export work.
#[derive(Debug, Clone)]
pub struct PageEntry {
    pub id: String,
    /// `None` renders no header (unpublished page, or emission disabled).
    pub frontmatter: Option<Frontmatter>,
}
