use async_trait::async_trait;
use sqlx::PgConnection;

use super::{resolve_id, CatalogError, CatalogResource, Flow};
use crate::database::models::{Grape, NewGrape, Region};
use crate::database::{DatabaseError, Repository};
use crate::schemas::{key_of, GrapePayload, GrapeView, NameRef};

#[async_trait]
impl CatalogResource for Grape {
    type Payload = GrapePayload;
    type View = GrapeView;

    const COLLECTION: &'static str = "grapes";

    fn payload_key(payload: &GrapePayload) -> Option<&str> {
        payload.name.as_deref()
    }

    fn default_key(payload: &mut GrapePayload, key: &str) {
        payload.name.get_or_insert_with(|| key.to_string());
    }

    async fn create(conn: &mut PgConnection, payload: GrapePayload) -> Result<Self, CatalogError> {
        let region_id = resolve_id::<Region, _>(&mut *conn, key_of(&payload.region), Flow::Create).await?;

        let new = NewGrape {
            name: payload.name.unwrap_or_default(),
            description: payload.description,
            region_id,
        };
        Ok(Grape::insert(conn, new).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        mut existing: Self,
        payload: GrapePayload,
    ) -> Result<Self, CatalogError> {
        if let Some(id) = resolve_id::<Region, _>(&mut *conn, key_of(&payload.region), Flow::Update).await? {
            existing.region_id = Some(id);
        }
        if let Some(name) = payload.name {
            existing.name = name;
        }
        if payload.description.is_some() {
            existing.description = payload.description;
        }
        Ok(existing.save(conn).await?)
    }

    async fn view(self, conn: &mut PgConnection) -> Result<GrapeView, DatabaseError> {
        let region = Repository::<Region>::new(&mut *conn).key_of(self.region_id).await?;
        Ok(GrapeView {
            id: self.id,
            name: self.name,
            description: self.description,
            region: region.map(NameRef::from),
        })
    }
}
