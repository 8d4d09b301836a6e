//! Responsible for all communication with the catalog service.

use crate::domain::model::{
    Author, AuthorDraft, Book, BookDraft, EntityId, Genre, GenreDraft, ImageUpload,
};
use crate::infra::config::Settings;
use crate::infra::http::error::ApiError;
use crate::infra::http::service::EntityService;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Typed pass-through client for the catalog REST endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_settings(&Settings {
            api_base_url: base_url.into(),
            ..Settings::default()
        })
    }

    pub fn with_settings(settings: &Settings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "catalog request");
        self.http.request(method, url)
    }

    /// Sends the request and turns any non-2xx status into an [`ApiError`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("catalog request failed: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = ApiError::from_status_body(status, &body);
        tracing::warn!(%status, "catalog request rejected: {}", err);
        Err(err)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("GET {}: {}", path, e)))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    // --- Books ---

    pub async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.fetch_json("/books").await
    }

    /// Single book with author and genre expanded.
    pub async fn get_book(&self, id: &EntityId) -> Result<Book, ApiError> {
        self.fetch_json(&format!("/book/{}", id)).await
    }

    pub async fn create_book(&self, draft: &BookDraft) -> Result<(), ApiError> {
        let form = book_form(draft)?;
        self.execute(self.request(Method::POST, "/book").multipart(form))
            .await
    }

    pub async fn update_book(&self, id: &EntityId, draft: &BookDraft) -> Result<(), ApiError> {
        let form = book_form(draft)?;
        self.execute(
            self.request(Method::PUT, &format!("/book/{}", id))
                .multipart(form),
        )
        .await
    }

    pub async fn delete_book(&self, id: &EntityId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/book/{}", id)))
            .await
    }

    // --- Authors ---

    pub async fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        self.fetch_json("/authors").await
    }

    pub async fn get_author(&self, id: &EntityId) -> Result<Author, ApiError> {
        self.fetch_json(&format!("/author/{}", id)).await
    }

    pub async fn create_author(&self, draft: &AuthorDraft) -> Result<(), ApiError> {
        let mut form = Form::new()
            .text("author_name", draft.author_name.clone())
            .text("biography", draft.biography.clone());
        if let Some(image) = &draft.image {
            form = form.part("image", image_part(image)?);
        }
        self.execute(self.request(Method::POST, "/author").multipart(form))
            .await
    }

    /// Author updates are JSON, unlike creation: the image is referenced by URL.
    pub async fn update_author(&self, id: &EntityId, draft: &AuthorDraft) -> Result<(), ApiError> {
        let body = json!({
            "author_name": draft.author_name,
            "biography": draft.biography,
            "imageUrl": draft.image_url,
        });
        self.execute(
            self.request(Method::PUT, &format!("/author/{}", id))
                .json(&body),
        )
        .await
    }

    pub async fn delete_author(&self, id: &EntityId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/authors/{}", id)))
            .await
    }

    // --- Genres ---

    pub async fn list_genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.fetch_json("/genres").await
    }

    pub async fn get_genre(&self, id: &EntityId) -> Result<Genre, ApiError> {
        self.fetch_json(&format!("/genre/{}", id)).await
    }

    pub async fn create_genre(&self, draft: &GenreDraft) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, "/genres").json(draft))
            .await
    }

    pub async fn update_genre(&self, id: &EntityId, draft: &GenreDraft) -> Result<(), ApiError> {
        self.execute(
            self.request(Method::PUT, &format!("/genre/{}", id))
                .json(draft),
        )
        .await
    }

    pub async fn delete_genre(&self, id: &EntityId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &format!("/genre/{}", id)))
            .await
    }
}

fn image_part(image: &ImageUpload) -> Result<Part, ApiError> {
    let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
    match &image.mime {
        Some(mime) => Ok(part.mime_str(mime)?),
        None => Ok(part),
    }
}

fn book_form(draft: &BookDraft) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("title", draft.title.clone())
        .text("price", draft.price.to_string())
        .text(
            "publication_date",
            draft.publication_date.format("%Y-%m-%d").to_string(),
        )
        .text("author_id", draft.author_id.to_string())
        .text("genre_id", draft.genre_id.to_string());
    if let Some(image) = &draft.image {
        form = form.part("image", image_part(image)?);
    }
    Ok(form)
}

#[async_trait]
impl EntityService<Book> for CatalogClient {
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        self.list_books().await
    }

    async fn get(&self, id: &EntityId) -> Result<Book, ApiError> {
        self.get_book(id).await
    }

    async fn create(&self, draft: &BookDraft) -> Result<(), ApiError> {
        self.create_book(draft).await
    }

    async fn update(&self, id: &EntityId, draft: &BookDraft) -> Result<(), ApiError> {
        self.update_book(id, draft).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ApiError> {
        self.delete_book(id).await
    }
}

#[async_trait]
impl EntityService<Author> for CatalogClient {
    async fn list(&self) -> Result<Vec<Author>, ApiError> {
        self.list_authors().await
    }

    async fn get(&self, id: &EntityId) -> Result<Author, ApiError> {
        self.get_author(id).await
    }

    async fn create(&self, draft: &AuthorDraft) -> Result<(), ApiError> {
        self.create_author(draft).await
    }

    async fn update(&self, id: &EntityId, draft: &AuthorDraft) -> Result<(), ApiError> {
        self.update_author(id, draft).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ApiError> {
        self.delete_author(id).await
    }
}

#[async_trait]
impl EntityService<Genre> for CatalogClient {
    async fn list(&self) -> Result<Vec<Genre>, ApiError> {
        self.list_genres().await
    }

    async fn get(&self, id: &EntityId) -> Result<Genre, ApiError> {
        self.get_genre(id).await
    }

    async fn create(&self, draft: &GenreDraft) -> Result<(), ApiError> {
        self.create_genre(draft).await
    }

    async fn update(&self, id: &EntityId, draft: &GenreDraft) -> Result<(), ApiError> {
        self.update_genre(id, draft).await
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ApiError> {
        self.delete_genre(id).await
    }
}
