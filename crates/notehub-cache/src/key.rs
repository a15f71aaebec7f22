//! Cache key for note-list queries

use notehub_api::Tag;
use std::fmt;

/// Identity of one list query: settled search text, page, optional tag filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Settled (debounced) search text
    pub search: String,
    /// Requested page, 1-based
    pub page: u32,
    /// Optional tag filter
    pub tag: Option<Tag>,
}

impl QueryKey {
    /// Key for an arbitrary page
    #[inline]
    #[must_use]
    pub fn new(search: impl Into<String>, page: u32, tag: Option<Tag>) -> Self {
        Self {
            search: search.into(),
            page,
            tag,
        }
    }

    /// Key for the first page of a query
    #[inline]
    #[must_use]
    pub fn first_page(search: impl Into<String>, tag: Option<Tag>) -> Self {
        Self::new(search, 1, tag)
    }

    /// Same query, different page
    #[inline]
    #[must_use]
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            search: self.search.clone(),
            page,
            tag: self.tag,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{:?} p{} tag={tag}", self.search, self.page),
            None => write!(f, "{:?} p{}", self.search, self.page),
        }
    }
}
