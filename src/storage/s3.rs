use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use std::time::Duration;
use tracing::{error, info};

use super::{ObjectStore, PresignedUpload, StorageError};
use crate::config::StorageConfig;

/// S3 (or S3 compatible) bucket holding wine pictures
#[derive(Clone, Debug)]
pub struct S3Store {
    client: Client,
    bucket: String,
    upload_expiry: Duration,
    download_expiry: Duration,
}

impl S3Store {
    /// Build a client from config; `None` when no bucket is configured.
    pub async fn from_config(config: &StorageConfig) -> Option<Self> {
        let bucket = config.bucket.clone()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let (Some(id), Some(secret)) = (&config.access_key_id, &config.access_key_secret) {
            loader = loader.credentials_provider(Credentials::new(
                id.clone(),
                secret.clone(),
                None,
                None,
                "winetime-config",
            ));
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;

        // Custom endpoints (MinIO, localstack) only serve path-style requests
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint_url.is_some())
            .build();

        info!("Picture storage uses bucket {}", bucket);
        Some(Self {
            client: Client::from_conf(s3_config),
            bucket,
            upload_expiry: Duration::from_secs(config.upload_expiry_secs),
            download_expiry: Duration::from_secs(config.download_expiry_secs),
        })
    }

    fn presigning(expiry: Duration) -> Result<PresigningConfig, StorageError> {
        PresigningConfig::expires_in(expiry).map_err(|e| {
            error!("Invalid presign expiry: {}", e);
            StorageError::RequestFailed(e.to_string())
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.client.head_object().bucket(&self.bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err.as_service_error().map(|e| e.is_not_found()) == Some(true) {
                    Ok(false)
                } else {
                    error!("HEAD {} failed: {}", key, err);
                    Err(StorageError::RequestFailed(err.to_string()))
                }
            }
        }
    }

    async fn presign_upload(
        &self,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<PresignedUpload, StorageError> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_string))
            .presigned(Self::presigning(self.upload_expiry)?)
            .await
            .map_err(|e| {
                error!("Presigning upload for {} failed: {}", key, e);
                StorageError::RequestFailed(e.to_string())
            })?;

        Ok(PresignedUpload {
            url: presigned.uri().to_string(),
            headers: presigned
                .headers()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
    }

    async fn presign_download(&self, key: &str) -> Result<String, StorageError> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning(self.download_expiry)?)
            .await
            .map_err(|e| {
                error!("Presigning download for {} failed: {}", key, e);
                StorageError::RequestFailed(e.to_string())
            })?;

        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::schemas::WinePayload;
    use crate::storage::checked_filename;
    use garde::Validate;

    async fn store() -> S3Store {
        let mut config = AppConfig::for_tests().storage;
        config.bucket = Some("winetime-pictures".to_string());
        config.region = Some("eu-north-1".to_string());
        config.access_key_id = Some("AKIDEXAMPLE".to_string());
        config.access_key_secret = Some("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string());
        S3Store::from_config(&config).await.expect("bucket is configured")
    }

    #[tokio::test]
    async fn missing_bucket_disables_storage() {
        let config = AppConfig::for_tests().storage;
        assert!(S3Store::from_config(&config).await.is_none());
    }

    #[tokio::test]
    async fn long_picture_keys_are_accepted_by_wine_payloads() {
        let key = checked_filename(&format!("{}.png", "a".repeat(200))).unwrap();
        let url = store().await.presign_download(&key).await.unwrap();
        assert!(url.len() > 500, "presigned url only {} chars", url.len());
        assert!(url.contains(&key));

        let payload = WinePayload {
            name: Some("Long Label".to_string()),
            uploaded_picture: Some(url),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }
}
