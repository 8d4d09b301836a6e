use super::fields;
use super::{Author, CatalogEntity, EntityId, EntityKind, FieldValue, Genre, ImageUpload, Related, SortField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(alias = "book_id")]
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "fields::lenient_price")]
    pub price: Option<f64>,
    #[serde(
        default,
        alias = "publicationDate",
        deserialize_with = "fields::lenient_date"
    )]
    pub publication_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Related<Author>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Related<Genre>>,
    #[serde(default, alias = "image", alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl Book {
    pub fn author_name(&self) -> Option<&str> {
        match self.author.as_ref()? {
            Related::Expanded(a) => Some(a.author_name.as_str()),
            Related::Name(name) => Some(name.as_str()),
        }
    }

    pub fn genre_name(&self) -> Option<&str> {
        match self.genre.as_ref()? {
            Related::Expanded(g) => Some(g.genre_name.as_str()),
            Related::Name(name) => Some(name.as_str()),
        }
    }

    /// Author id, taken from the expanded author when the flat field is absent.
    pub fn author_ref(&self) -> Option<&EntityId> {
        self.author_id.as_ref().or_else(|| match self.author.as_ref()? {
            Related::Expanded(a) => Some(&a.author_id),
            Related::Name(_) => None,
        })
    }

    pub fn genre_ref(&self) -> Option<&EntityId> {
        self.genre_id.as_ref().or_else(|| match self.genre.as_ref()? {
            Related::Expanded(g) => Some(&g.genre_id),
            Related::Name(_) => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Id,
    Title,
    Author,
    Genre,
    PublicationDate,
    Price,
}

impl SortField for BookField {
    fn all() -> &'static [Self] {
        &[
            BookField::Id,
            BookField::Title,
            BookField::Author,
            BookField::Genre,
            BookField::PublicationDate,
            BookField::Price,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Genre => "genre",
            BookField::PublicationDate => "publication_date",
            BookField::Price => "price",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BookField::Id => "BookId",
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Genre => "Genre",
            BookField::PublicationDate => "Publication Date",
            BookField::Price => "Price",
        }
    }
}

/// Validated fields of the multipart create/update book request.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub price: f64,
    pub publication_date: NaiveDate,
    pub author_id: EntityId,
    pub genre_id: EntityId,
    pub image: Option<ImageUpload>,
}

impl CatalogEntity for Book {
    type Field = BookField;
    type Draft = BookDraft;

    const KIND: EntityKind = EntityKind::Book;
    const DEFAULT_SORT: BookField = BookField::Id;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn search_text(&self) -> &str {
        &self.title
    }

    fn sort_value(&self, field: BookField) -> FieldValue<'_> {
        match field {
            BookField::Id => self.id.sort_value(),
            BookField::Title => FieldValue::Text(&self.title),
            BookField::Author => match (self.author_name(), self.author_ref()) {
                (Some(name), _) => FieldValue::Text(name),
                (None, Some(id)) => id.sort_value(),
                (None, None) => FieldValue::Missing,
            },
            BookField::Genre => match (self.genre_name(), self.genre_ref()) {
                (Some(name), _) => FieldValue::Text(name),
                (None, Some(id)) => id.sort_value(),
                (None, None) => FieldValue::Missing,
            },
            BookField::PublicationDate => self
                .publication_date
                .map(FieldValue::Date)
                .unwrap_or(FieldValue::Missing),
            BookField::Price => self
                .price
                .map(FieldValue::Number)
                .unwrap_or(FieldValue::Missing),
        }
    }
}
