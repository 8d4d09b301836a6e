use super::{CatalogEntity, EntityId, EntityKind, FieldValue, SortField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(alias = "id")]
    pub genre_id: EntityId,
    #[serde(default, alias = "name")]
    pub genre_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreField {
    Id,
    Name,
}

impl SortField for GenreField {
    fn all() -> &'static [Self] {
        &[GenreField::Id, GenreField::Name]
    }

    fn name(self) -> &'static str {
        match self {
            GenreField::Id => "id",
            GenreField::Name => "name",
        }
    }

    fn label(self) -> &'static str {
        match self {
            GenreField::Id => "GenreId",
            GenreField::Name => "Name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreDraft {
    pub genre_name: String,
}

impl CatalogEntity for Genre {
    type Field = GenreField;
    type Draft = GenreDraft;

    const KIND: EntityKind = EntityKind::Genre;
    const DEFAULT_SORT: GenreField = GenreField::Id;

    fn id(&self) -> &EntityId {
        &self.genre_id
    }

    fn search_text(&self) -> &str {
        &self.genre_name
    }

    fn sort_value(&self, field: GenreField) -> FieldValue<'_> {
        match field {
            GenreField::Id => self.genre_id.sort_value(),
            GenreField::Name => FieldValue::Text(&self.genre_name),
        }
    }
}
