use async_trait::async_trait;
use sqlx::PgConnection;

use super::{resolve_id, CatalogError, CatalogResource, Flow};
use crate::database::models::{Country, NewRegion, Region};
use crate::database::{DatabaseError, Repository};
use crate::schemas::{key_of, NameRef, RegionPayload, RegionView};

#[async_trait]
impl CatalogResource for Region {
    type Payload = RegionPayload;
    type View = RegionView;

    const COLLECTION: &'static str = "regions";

    fn payload_key(payload: &RegionPayload) -> Option<&str> {
        payload.name.as_deref()
    }

    fn default_key(payload: &mut RegionPayload, key: &str) {
        payload.name.get_or_insert_with(|| key.to_string());
    }

    async fn create(conn: &mut PgConnection, payload: RegionPayload) -> Result<Self, CatalogError> {
        let country_id = resolve_id::<Country, _>(&mut *conn, key_of(&payload.country), Flow::Create).await?;

        let new = NewRegion {
            name: payload.name.unwrap_or_default(),
            country_id,
        };
        Ok(Region::insert(conn, new).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        mut existing: Self,
        payload: RegionPayload,
    ) -> Result<Self, CatalogError> {
        if let Some(id) = resolve_id::<Country, _>(&mut *conn, key_of(&payload.country), Flow::Update).await? {
            existing.country_id = Some(id);
        }
        if let Some(name) = payload.name {
            existing.name = name;
        }
        Ok(existing.save(conn).await?)
    }

    async fn view(self, conn: &mut PgConnection) -> Result<RegionView, DatabaseError> {
        let country = Repository::<Country>::new(&mut *conn).key_of(self.country_id).await?;
        Ok(RegionView {
            id: self.id,
            name: self.name,
            country: country.map(NameRef::from),
        })
    }
}
