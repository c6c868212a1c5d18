//! In-memory stand-ins used by unit tests.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::put;
use axum::Router;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::database::models::{Country, WineType};
use crate::database::{Database, DatabaseError, Entity};
use crate::services::KeyStore;
use crate::state::AppState;
use crate::storage::{ObjectStore, PresignedUpload, StorageError};

/// Rows that can be created from a bare business key
pub trait FromKey: Entity + Clone {
    fn from_key(id: i32, key: &str) -> Self;
}

impl FromKey for Country {
    fn from_key(id: i32, key: &str) -> Self {
        Country {
            id,
            name: key.to_string(),
        }
    }
}

impl FromKey for WineType {
    fn from_key(id: i32, key: &str) -> Self {
        WineType {
            id,
            kind: key.to_string(),
        }
    }
}

/// Vec-backed key store that counts lookups
pub struct MemoryStore<T> {
    pub rows: Vec<T>,
    pub lookups: usize,
}

impl<T: FromKey> MemoryStore<T> {
    pub fn with(rows: Vec<T>) -> Self {
        Self { rows, lookups: 0 }
    }
}

#[async_trait]
impl<T: FromKey> KeyStore<T> for MemoryStore<T> {
    async fn find_by_key(&mut self, key: &str) -> Result<Option<T>, DatabaseError> {
        self.lookups += 1;
        Ok(self.rows.iter().find(|row| row.key() == key).cloned())
    }

    async fn insert_key(&mut self, key: &str) -> Result<T, DatabaseError> {
        if self.rows.iter().any(|row| row.key() == key) {
            return Err(DatabaseError::UniqueViolation(format!("{}_key", T::TABLE)));
        }
        let id = self.rows.iter().map(Entity::id).max().unwrap_or(0) + 1;
        let row = T::from_key(id, key);
        self.rows.push(row.clone());
        Ok(row)
    }
}

/// Object store that presigns uploads against a local HTTP target
pub struct FakeStore {
    upload_base: String,
    objects: HashSet<String>,
    requests: AtomicUsize,
    uploads: AtomicUsize,
}

impl FakeStore {
    pub fn new(upload_base: &str) -> Self {
        Self {
            upload_base: upload_base.to_string(),
            objects: HashSet::new(),
            requests: AtomicUsize::new(0),
            uploads: AtomicUsize::new(0),
        }
    }

    pub fn with_object(mut self, key: &str) -> Self {
        self.objects.insert(key.to_string());
        self
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.contains(key))
    }

    async fn presign_upload(
        &self,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<PresignedUpload, StorageError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(PresignedUpload {
            url: format!("{}/upload/{}", self.upload_base, key),
            headers: content_type
                .map(|ct| vec![("content-type".to_string(), ct.to_string())])
                .unwrap_or_default(),
        })
    }

    async fn presign_download(&self, key: &str) -> Result<String, StorageError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://download.test/{}", key))
    }
}

/// Serve `PUT /upload/:key` answering every request with `status`
pub async fn spawn_upload_target(status: StatusCode) -> String {
    let app = Router::new().route("/upload/:key", put(move || async move { status }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upload target");
    let addr = listener.local_addr().expect("upload target address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

/// App state over a lazy pool that never connects unless a query runs
pub fn test_state(storage: Option<Arc<dyn ObjectStore>>) -> AppState {
    let config = AppConfig::for_tests();
    let db = Database::connect_lazy(&config.database).expect("lazy pool");
    let tokens = TokenKeys::from_config(&config.security).expect("token keys");
    AppState {
        config: Arc::new(config),
        db,
        tokens: Arc::new(tokens),
        storage,
        http: reqwest::Client::new(),
    }
}
