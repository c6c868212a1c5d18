use async_trait::async_trait;
use sqlx::PgConnection;

use super::{CatalogError, CatalogResource};
use crate::database::models::Country;
use crate::database::{DatabaseError, Repository};
use crate::schemas::{CountryPayload, CountryView};

#[async_trait]
impl CatalogResource for Country {
    type Payload = CountryPayload;
    type View = CountryView;

    const COLLECTION: &'static str = "countries";

    fn payload_key(payload: &CountryPayload) -> Option<&str> {
        payload.name.as_deref()
    }

    fn default_key(payload: &mut CountryPayload, key: &str) {
        payload.name.get_or_insert_with(|| key.to_string());
    }

    async fn create(conn: &mut PgConnection, payload: CountryPayload) -> Result<Self, CatalogError> {
        let name = payload.name.unwrap_or_default();
        Ok(Repository::<Country>::new(conn).insert_key(&name).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        mut existing: Self,
        payload: CountryPayload,
    ) -> Result<Self, CatalogError> {
        if let Some(name) = payload.name {
            existing.name = name;
        }
        Ok(existing.save(conn).await?)
    }

    async fn view(self, _conn: &mut PgConnection) -> Result<CountryView, DatabaseError> {
        Ok(self.into())
    }
}
