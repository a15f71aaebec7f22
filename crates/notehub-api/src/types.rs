//! Wire types for the NoteHub notes service
//!
//! Defines the data model shared by every crate in the workspace:
//! - Note categories (tags)
//! - Notes as the server returns them
//! - Create payloads
//! - Paginated list results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed category attached to every note, usable as an optional list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// Task-style note
    Todo,
    /// Work note
    Work,
    /// Personal note
    Personal,
    /// Meeting note
    Meeting,
    /// Shopping note
    Shopping,
}

impl Tag {
    /// All tags the service accepts
    pub const ALL: [Tag; 5] = [
        Tag::Todo,
        Tag::Work,
        Tag::Personal,
        Tag::Meeting,
        Tag::Shopping,
    ];

    /// Wire representation of the tag
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Todo => "Todo",
            Tag::Work => "Work",
            Tag::Personal => "Personal",
            Tag::Meeting => "Meeting",
            Tag::Shopping => "Shopping",
        }
    }

    /// Parse a list-filter slug where `"All"` means no filter
    ///
    /// # Errors
    /// `ParseTagError` when the slug is neither `All` nor a known tag
    pub fn from_filter_slug(slug: &str) -> Result<Option<Tag>, ParseTagError> {
        if slug == "All" {
            return Ok(None);
        }
        slug.parse().map(Some)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Todo" => Ok(Tag::Todo),
            "Work" => Ok(Tag::Work),
            "Personal" => Ok(Tag::Personal),
            "Meeting" => Ok(Tag::Meeting),
            "Shopping" => Ok(Tag::Shopping),
            other => Err(ParseTagError {
                value: other.to_string(),
            }),
        }
    }
}

/// Error for strings outside the five enumerated tags
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag: {value}")]
pub struct ParseTagError {
    /// The rejected input
    pub value: String,
}

/// A note as the server owns it
///
/// The client never mutates fields in place; changed content is only ever
/// observed through a re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Category
    pub tag: Tag,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Category
    pub tag: Tag,
}

impl NoteDraft {
    /// Create a draft
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag: Tag) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag,
        }
    }
}

/// One page of list results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Notes on this page, server order
    pub notes: Vec<Note>,
    /// Total number of pages for the query
    pub total_pages: u32,
}

impl PageResult {
    /// Empty result (zero pages)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            notes: Vec::new(),
            total_pages: 0,
        }
    }
}
