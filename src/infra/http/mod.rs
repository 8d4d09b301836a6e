pub mod client;
pub mod error;
pub mod service;

pub use client::CatalogClient;
pub use error::ApiError;
pub use service::EntityService;
