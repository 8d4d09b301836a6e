//! Add/edit forms: raw operator input validated into drafts.

use crate::domain::model::fields::{parse_date, parse_decimal};
use crate::domain::model::{
    Author, AuthorDraft, Book, BookDraft, CatalogEntity, EntityId, Genre, GenreDraft, ImageUpload,
};
use crate::infra::http::{ApiError, EntityService};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be {expected}, got {got:?}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error("{field} {id} is not one of the available options")]
    UnknownOption { field: &'static str, id: EntityId },

    #[error("cannot read image {path}: {message}")]
    Image { path: String, message: String },
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required { field });
    }
    Ok(value.to_string())
}

/// Authors and genres offered by the book form's pickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFormOptions {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

impl BookFormOptions {
    /// Fetches both option lists concurrently.
    pub async fn load(
        authors: &dyn EntityService<Author>,
        genres: &dyn EntityService<Genre>,
    ) -> Result<Self, ApiError> {
        let (authors, genres) = tokio::try_join!(authors.list(), genres.list())?;
        Ok(Self { authors, genres })
    }

    pub fn has_author(&self, id: &EntityId) -> bool {
        self.authors.iter().any(|a| a.id() == id)
    }

    pub fn has_genre(&self, id: &EntityId) -> bool {
        self.genres.iter().any(|g| g.id() == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub price: String,
    pub publication_date: String,
    pub author_id: String,
    pub genre_id: String,
    pub image: Option<ImageUpload>,
}

impl BookForm {
    /// Pre-fills the edit form from the stored book.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            price: book.price.map(|p| p.to_string()).unwrap_or_default(),
            publication_date: book
                .publication_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            author_id: book.author_ref().map(|id| id.to_string()).unwrap_or_default(),
            genre_id: book.genre_ref().map(|id| id.to_string()).unwrap_or_default(),
            image: None,
        }
    }

    /// Validates every field. When `options` is given, the author and genre must be among them.
    pub fn validate(&self, options: Option<&BookFormOptions>) -> Result<BookDraft, FormError> {
        let title = required("title", &self.title)?;

        let raw_price = required("price", &self.price)?;
        let price = parse_decimal(&raw_price)
            .filter(|p| *p >= 0.0)
            .ok_or_else(|| FormError::Invalid {
                field: "price",
                expected: "a non-negative decimal",
                got: raw_price.clone(),
            })?;

        let raw_date = required("publication_date", &self.publication_date)?;
        let publication_date = parse_date(&raw_date).ok_or_else(|| FormError::Invalid {
            field: "publication_date",
            expected: "a date (YYYY-MM-DD)",
            got: raw_date.clone(),
        })?;

        let author_id = EntityId::new(required("author_id", &self.author_id)?);
        let genre_id = EntityId::new(required("genre_id", &self.genre_id)?);

        if let Some(options) = options {
            if !options.has_author(&author_id) {
                return Err(FormError::UnknownOption {
                    field: "author_id",
                    id: author_id,
                });
            }
            if !options.has_genre(&genre_id) {
                return Err(FormError::UnknownOption {
                    field: "genre_id",
                    id: genre_id,
                });
            }
        }

        Ok(BookDraft {
            title,
            price,
            publication_date,
            author_id,
            genre_id,
            image: self.image.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorForm {
    pub author_name: String,
    pub biography: String,
    pub image: Option<ImageUpload>,
    pub image_url: Option<String>,
}

impl AuthorForm {
    pub fn from_author(author: &Author) -> Self {
        Self {
            author_name: author.author_name.clone(),
            biography: author.biography.clone(),
            image: None,
            image_url: author.image_url.clone(),
        }
    }

    pub fn validate(&self) -> Result<AuthorDraft, FormError> {
        Ok(AuthorDraft {
            author_name: required("author_name", &self.author_name)?,
            biography: self.biography.trim().to_string(),
            image: self.image.clone(),
            image_url: self
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreForm {
    pub genre_name: String,
}

impl GenreForm {
    pub fn from_genre(genre: &Genre) -> Self {
        Self {
            genre_name: genre.genre_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<GenreDraft, FormError> {
        Ok(GenreDraft {
            genre_name: required("genre_name", &self.genre_name)?,
        })
    }
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Reads an image file for a multipart upload.
pub async fn load_image(path: &Path) -> Result<ImageUpload, FormError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| FormError::Image {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload {
        file_name,
        bytes,
        mime: mime_for(path).map(str::to_string),
    })
}
