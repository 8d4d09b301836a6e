//! Shared fixtures: record builders, an in-memory `EntityService`, and a helper that serves an
//! axum router on an ephemeral port.

#![allow(dead_code)]

use async_trait::async_trait;
use catalog_admin::domain::model::Related;
use catalog_admin::{ApiError, Author, Book, CatalogEntity, EntityId, EntityService, Genre};
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub fn book(id: i64, title: &str) -> Book {
    Book {
        id: EntityId::from(id),
        title: title.to_string(),
        price: None,
        publication_date: None,
        author_id: None,
        genre_id: None,
        author: None,
        genre: None,
        image_url: None,
    }
}

pub fn priced_book(id: i64, title: &str, price: f64, date: &str, author: &str) -> Book {
    Book {
        price: Some(price),
        publication_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        author: Some(Related::Name(author.to_string())),
        ..book(id, title)
    }
}

pub fn author(id: i64, name: &str) -> Author {
    Author {
        author_id: EntityId::from(id),
        author_name: name.to_string(),
        biography: String::new(),
        image_url: None,
    }
}

pub fn genre(id: i64, name: &str) -> Genre {
    Genre {
        genre_id: EntityId::from(id),
        genre_name: name.to_string(),
    }
}

/// Titles "Book 01" .. "Book nn", ids 1..=n, inserted in reverse title order.
pub fn numbered_books(n: i64) -> Vec<Book> {
    (1..=n)
        .rev()
        .map(|i| book(i, &format!("Book {:02}", i)))
        .collect()
}

pub fn ids<E: CatalogEntity>(records: &[&E]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

pub fn titles(books: &[&Book]) -> Vec<String> {
    books.iter().map(|b| b.title.clone()).collect()
}

/// In-memory service. Updates and deletes of ids listed in `failing` are rejected with the given
/// message.
pub struct FakeService<E: CatalogEntity> {
    pub records: Mutex<Vec<E>>,
    pub failing: HashMap<EntityId, String>,
    pub fail_list: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl<E: CatalogEntity> FakeService<E> {
    pub fn new(records: Vec<E>) -> Self {
        Self {
            records: Mutex::new(records),
            failing: HashMap::new(),
            fail_list: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(mut self, id: i64, message: &str) -> Self {
        self.failing.insert(EntityId::from(id), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl<E: CatalogEntity> EntityService<E> for FakeService<E> {
    async fn list(&self) -> Result<Vec<E>, ApiError> {
        self.record("list".to_string());
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "Catalog is down for maintenance".to_string(),
            });
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get(&self, id: &EntityId) -> Result<E, ApiError> {
        self.record(format!("get {}", id));
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(ApiError::StatusWithoutMessage {
                status: StatusCode::NOT_FOUND,
            })
    }

    async fn create(&self, _draft: &E::Draft) -> Result<(), ApiError> {
        self.record("create".to_string());
        Ok(())
    }

    async fn update(&self, id: &EntityId, _draft: &E::Draft) -> Result<(), ApiError> {
        self.record(format!("update {}", id));
        if let Some(message) = self.failing.get(id) {
            return Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                message: message.clone(),
            });
        }
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ApiError> {
        self.record(format!("delete {}", id));
        if let Some(message) = self.failing.get(id) {
            return Err(ApiError::Status {
                status: StatusCode::CONFLICT,
                message: message.clone(),
            });
        }
        self.records.lock().unwrap().retain(|r| r.id() != id);
        Ok(())
    }
}

/// Serves `router` on 127.0.0.1 with an ephemeral port and returns its base URL.
pub async fn serve(router: axum::Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://127.0.0.1:{}", port), handle)
}
