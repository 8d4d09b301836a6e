use super::{CatalogEntity, EntityId, EntityKind, FieldValue, ImageUpload, SortField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(alias = "id")]
    pub author_id: EntityId,
    #[serde(default, alias = "name")]
    pub author_name: String,
    #[serde(default)]
    pub biography: String,
    #[serde(
        default,
        rename = "imageUrl",
        alias = "image_url",
        alias = "image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    Id,
    Name,
}

impl SortField for AuthorField {
    fn all() -> &'static [Self] {
        &[AuthorField::Id, AuthorField::Name]
    }

    fn name(self) -> &'static str {
        match self {
            AuthorField::Id => "id",
            AuthorField::Name => "name",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AuthorField::Id => "AuthorId",
            AuthorField::Name => "Name",
        }
    }
}

/// Author create goes out as multipart with an image file; update goes out as JSON with an
/// image URL. One draft carries both.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDraft {
    pub author_name: String,
    pub biography: String,
    pub image: Option<ImageUpload>,
    pub image_url: Option<String>,
}

impl CatalogEntity for Author {
    type Field = AuthorField;
    type Draft = AuthorDraft;

    const KIND: EntityKind = EntityKind::Author;
    const DEFAULT_SORT: AuthorField = AuthorField::Id;

    fn id(&self) -> &EntityId {
        &self.author_id
    }

    fn search_text(&self) -> &str {
        &self.author_name
    }

    fn sort_value(&self, field: AuthorField) -> FieldValue<'_> {
        match field {
            AuthorField::Id => self.author_id.sort_value(),
            AuthorField::Name => FieldValue::Text(&self.author_name),
        }
    }
}
