use async_trait::async_trait;
use garde::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgConnection;
use thiserror::Error;

use crate::database::{DatabaseError, Entity};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} {key} not found")]
    RelatedEntityNotFound { entity: &'static str, key: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// A catalog entity exposed under `/api/<COLLECTION>` with the five
/// standard operations. Handlers are generic over this trait; each entity
/// only supplies how its payload maps onto rows and how a row renders.
#[async_trait]
pub trait CatalogResource: Entity + Clone {
    type Payload: DeserializeOwned + Validate<Context = ()> + Send + Sync + 'static;
    type View: Serialize + Send + 'static;

    /// Path segment and list wrapper key
    const COLLECTION: &'static str;

    /// Business key carried by the payload
    fn payload_key(payload: &Self::Payload) -> Option<&str>;

    /// Fill a missing business key from the stored row before an update is validated
    fn default_key(payload: &mut Self::Payload, key: &str);

    async fn create(conn: &mut PgConnection, payload: Self::Payload) -> Result<Self, CatalogError>;

    /// Merge the payload into `existing`; omitted fields keep their stored value.
    async fn update(
        conn: &mut PgConnection,
        existing: Self,
        payload: Self::Payload,
    ) -> Result<Self, CatalogError>;

    async fn view(self, conn: &mut PgConnection) -> Result<Self::View, DatabaseError>;
}
