pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::list_page::{ListPage, LoadOutcome, LoadState};
pub use app::notifications::{Notice, NoticeKind, Notifications};
pub use domain::model::{
    Author, AuthorField, Book, BookField, CatalogEntity, EntityId, Genre, GenreField, SortField,
};
pub use domain::view::{transform, PageView, Selection, SortDirection, ViewAction, ViewState};
pub use infra::config::Settings;
pub use infra::http::{ApiError, CatalogClient, EntityService};
