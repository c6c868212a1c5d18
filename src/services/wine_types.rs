use async_trait::async_trait;
use sqlx::PgConnection;

use super::{CatalogError, CatalogResource};
use crate::database::models::WineType;
use crate::database::{DatabaseError, Repository};
use crate::schemas::{WineTypePayload, WineTypeView};

#[async_trait]
impl CatalogResource for WineType {
    type Payload = WineTypePayload;
    type View = WineTypeView;

    const COLLECTION: &'static str = "wine_types";

    fn payload_key(payload: &WineTypePayload) -> Option<&str> {
        payload.kind.as_deref()
    }

    fn default_key(payload: &mut WineTypePayload, key: &str) {
        payload.kind.get_or_insert_with(|| key.to_string());
    }

    async fn create(conn: &mut PgConnection, payload: WineTypePayload) -> Result<Self, CatalogError> {
        let kind = payload.kind.unwrap_or_default();
        Ok(Repository::<WineType>::new(conn).insert_key(&kind).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        mut existing: Self,
        payload: WineTypePayload,
    ) -> Result<Self, CatalogError> {
        if let Some(kind) = payload.kind {
            existing.kind = kind;
        }
        Ok(existing.save(conn).await?)
    }

    async fn view(self, _conn: &mut PgConnection) -> Result<WineTypeView, DatabaseError> {
        Ok(self.into())
    }
}
