//! Wine picture uploads through presigned object storage URLs.

pub mod s3;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use s3::S3Store;

static PICTURE_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Za-z0-9][A-Za-z0-9_().-]*\.(png|jpg|jpeg|gif|webp)$")
        .expect("picture filename pattern compiles")
});

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid picture filename: {0}")]
    InvalidFilename(String),

    #[error("Picture storage is not configured")]
    NotConfigured,

    #[error("Storage request failed")]
    RequestFailed(String),

    #[error("Upload rejected by storage (status {0})")]
    UploadRejected(u16),

    #[error("Unexpected storage error (status {0})")]
    Upstream(u16),

    #[error("Storage transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Presigned PUT request: target URL plus headers the signature covers
#[derive(Debug, Clone, PartialEq)]
pub struct PresignedUpload {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Picture file received with a wine payload
#[derive(Debug, Clone)]
pub struct PictureUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: axum::body::Bytes,
}

/// Object storage operations the upload flow needs
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    async fn presign_upload(
        &self,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<PresignedUpload, StorageError>;

    async fn presign_download(&self, key: &str) -> Result<String, StorageError>;
}

/// Reduce a client supplied filename to a safe object key: last path
/// component only, whitespace to underscores, anything outside
/// `[A-Za-z0-9._()-]` dropped and leading dots or underscores trimmed.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '(' | ')'))
        .collect();
    cleaned.trim_start_matches(['.', '_']).to_string()
}

/// Sanitize and check a picture filename before any storage request is made
pub fn checked_filename(raw: &str) -> Result<String, StorageError> {
    let key = sanitize_filename(raw);
    if key.is_empty() || key.len() > 255 || !PICTURE_FILENAME.is_match(&key) {
        return Err(StorageError::InvalidFilename(raw.to_string()));
    }
    Ok(key)
}

/// Upload a picture and return the URL to store on the wine.
///
/// An object already stored under the same key is reused rather than overwritten.
pub async fn upload_picture(
    store: &dyn ObjectStore,
    http: &reqwest::Client,
    picture: PictureUpload,
) -> Result<String, StorageError> {
    let key = checked_filename(&picture.filename)?;

    if store.exists(&key).await? {
        debug!("Picture {} already stored, reusing it", key);
        return store.presign_download(&key).await;
    }

    let presigned = store
        .presign_upload(&key, picture.content_type.as_deref())
        .await?;

    let mut request = http.put(&presigned.url).body(picture.bytes);
    for (name, value) in &presigned.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        info!("Uploaded picture {}", key);
        store.presign_download(&key).await
    } else if status.is_server_error() {
        warn!("Storage answered {} for picture {}", status, key);
        Err(StorageError::Upstream(status.as_u16()))
    } else {
        warn!("Storage rejected picture {} with {}", key, status);
        Err(StorageError::UploadRejected(status.as_u16()))
    }
}
