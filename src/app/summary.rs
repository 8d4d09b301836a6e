use crate::domain::model::{Author, Book, Genre};
use crate::infra::http::{ApiError, EntityService};

/// Collection sizes shown on the dashboard home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub books: usize,
    pub authors: usize,
    pub genres: usize,
}

impl CatalogSummary {
    pub async fn load(
        books: &dyn EntityService<Book>,
        authors: &dyn EntityService<Author>,
        genres: &dyn EntityService<Genre>,
    ) -> Result<Self, ApiError> {
        let (books, authors, genres) = tokio::try_join!(books.list(), authors.list(), genres.list())?;
        Ok(Self {
            books: books.len(),
            authors: authors.len(),
            genres: genres.len(),
        })
    }
}
