use async_trait::async_trait;
use sqlx::PgConnection;

use super::{resolve_id, CatalogError, CatalogResource, Flow};
use crate::database::models::{NewProducer, Producer, Region};
use crate::database::{DatabaseError, Repository};
use crate::schemas::{key_of, NameRef, ProducerPayload, ProducerView};

#[async_trait]
impl CatalogResource for Producer {
    type Payload = ProducerPayload;
    type View = ProducerView;

    const COLLECTION: &'static str = "producers";

    fn payload_key(payload: &ProducerPayload) -> Option<&str> {
        payload.name.as_deref()
    }

    fn default_key(payload: &mut ProducerPayload, key: &str) {
        payload.name.get_or_insert_with(|| key.to_string());
    }

    async fn create(conn: &mut PgConnection, payload: ProducerPayload) -> Result<Self, CatalogError> {
        let region_id = resolve_id::<Region, _>(&mut *conn, key_of(&payload.region), Flow::Create).await?;

        let new = NewProducer {
            name: payload.name.unwrap_or_default(),
            description: payload.description,
            region_id,
        };
        Ok(Producer::insert(conn, new).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        mut existing: Self,
        payload: ProducerPayload,
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

    async fn view(self, conn: &mut PgConnection) -> Result<ProducerView, DatabaseError> {
        let region = Repository::<Region>::new(&mut *conn).key_of(self.region_id).await?;
        Ok(ProducerView {
            id: self.id,
            name: self.name,
            description: self.description,
            region: region.map(NameRef::from),
        })
    }
}
