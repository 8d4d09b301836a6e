//! Catalog entity definitions (books, authors, genres).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;

pub mod author;
pub mod book;
pub mod fields;
pub mod genre;

pub use author::{Author, AuthorDraft, AuthorField};
pub use book::{Book, BookDraft, BookField};
pub use genre::{Genre, GenreDraft, GenreField};

/// Trait that defines the contract for any record listed by the admin pages.
///
/// The list page, the transformer and the selection set only work through this trait, so one
/// implementation of each serves books, authors and genres alike. Each entity provides:
/// - its server identifier
/// - the text searched by the list filter
/// - a typed value per sortable column
pub trait CatalogEntity: Clone + Send + Sync + 'static {
    /// Sortable columns of this entity.
    type Field: SortField;

    /// Validated input for create/update requests.
    type Draft: Send + Sync;

    const KIND: EntityKind;

    /// Column used for ordering when a page is first mounted.
    const DEFAULT_SORT: Self::Field;

    fn id(&self) -> &EntityId;

    /// The field matched by the search box (title for books, name otherwise).
    fn search_text(&self) -> &str;

    fn sort_value(&self, field: Self::Field) -> FieldValue<'_>;
}

/// A column that a list page can be ordered by.
pub trait SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    fn all() -> &'static [Self];

    /// Wire/CLI name of the column.
    fn name(self) -> &'static str;

    /// Header label shown above the column.
    fn label(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        let wanted = name.trim().to_lowercase().replace('-', "_");
        Self::all().iter().copied().find(|f| f.name() == wanted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Author,
    Genre,
}

impl EntityKind {
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Book => "book",
            EntityKind::Author => "author",
            EntityKind::Genre => "genre",
        }
    }

    /// Capitalized name used at the start of operator messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Book => "Book",
            EntityKind::Author => "Author",
            EntityKind::Genre => "Genre",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Book => "books",
            EntityKind::Author => "authors",
            EntityKind::Genre => "genres",
        }
    }
}

/// Server-side identifier of an entity.
///
/// The service sends ids either as JSON strings or integers; both are held as text so that
/// equality matches what the operator types on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form of the id, when it is an integer.
    pub fn as_number(&self) -> Option<i64> {
        self.0.trim().parse::<i64>().ok()
    }

    /// Ids order numerically when they are integers, lexicographically otherwise.
    pub fn sort_value(&self) -> FieldValue<'_> {
        match self.as_number() {
            Some(n) => FieldValue::Integer(n),
            None => FieldValue::Text(&self.0),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl std::str::FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = JsonValue::deserialize(deserializer)?;
        fields::id_from_json(&raw)
            .map(EntityId)
            .ok_or_else(|| serde::de::Error::custom(format!("expected string or integer id, got {}", raw)))
    }
}

/// A related record as the service sends it: expanded into an object on detail endpoints, or
/// reduced to a display name on list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    Expanded(T),
    Name(String),
}

/// Image file attached to a multipart create/update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

/// A column value, typed so that sorting follows the field's semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    /// Compared exactly, without a round trip through `f64`.
    Integer(i64),
    Number(f64),
    Date(chrono::NaiveDate),
    Text(&'a str),
}

impl FieldValue<'_> {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Integer(_) | FieldValue::Number(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// Total order: missing values first, then by variant, then by value.
    pub fn total_cmp(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Number(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Number(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}
