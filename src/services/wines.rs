use async_trait::async_trait;
use sqlx::PgConnection;

use super::{resolve_id, CatalogError, CatalogResource, Flow};
use crate::database::models::wine::DEFAULT_VOLUME;
use crate::database::models::{Grape, NewWine, Producer, Wine, WineType};
use crate::database::{DatabaseError, Repository};
use crate::schemas::{key_of, NameRef, TypeRef, WinePayload, WineView};

#[async_trait]
impl CatalogResource for Wine {
    type Payload = WinePayload;
    type View = WineView;

    const COLLECTION: &'static str = "wines";

    fn payload_key(payload: &WinePayload) -> Option<&str> {
        payload.name.as_deref()
    }

    fn default_key(payload: &mut WinePayload, key: &str) {
        payload.name.get_or_insert_with(|| key.to_string());
    }

    async fn create(conn: &mut PgConnection, payload: WinePayload) -> Result<Self, CatalogError> {
        let wine_type_id =
            resolve_id::<WineType, _>(&mut *conn, key_of(&payload.wine_type), Flow::Create).await?;
        let producer_id =
            resolve_id::<Producer, _>(&mut *conn, key_of(&payload.producer), Flow::Create).await?;
        let grape_id = resolve_id::<Grape, _>(&mut *conn, key_of(&payload.grape), Flow::Create).await?;

        let new = NewWine {
            name: payload.name.unwrap_or_default(),
            style: payload.style,
            wine_type_id,
            producer_id,
            grape_id,
            year_produced: payload.year_produced,
            alcohol_percentage: payload.alcohol_percentage,
            volume: Some(payload.volume.unwrap_or(DEFAULT_VOLUME)),
            picture: payload.uploaded_picture.or(payload.picture),
            description: payload.description,
        };
        Ok(Wine::insert(conn, new).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        mut existing: Self,
        payload: WinePayload,
    ) -> Result<Self, CatalogError> {
        if let Some(id) =
            resolve_id::<WineType, _>(&mut *conn, key_of(&payload.wine_type), Flow::Update).await?
        {
            existing.wine_type_id = Some(id);
        }
        if let Some(id) =
            resolve_id::<Producer, _>(&mut *conn, key_of(&payload.producer), Flow::Update).await?
        {
            existing.producer_id = Some(id);
        }
        if let Some(id) = resolve_id::<Grape, _>(&mut *conn, key_of(&payload.grape), Flow::Update).await? {
            existing.grape_id = Some(id);
        }

        if let Some(name) = payload.name {
            existing.name = name;
        }
        // Scalars: present values replace, omitted ones keep the stored value
        existing.style = payload.style.or(existing.style);
        existing.year_produced = payload.year_produced.or(existing.year_produced);
        existing.alcohol_percentage = payload.alcohol_percentage.or(existing.alcohol_percentage);
        existing.volume = payload.volume.or(existing.volume);
        existing.picture = payload
            .uploaded_picture
            .or(payload.picture)
            .or(existing.picture);
        existing.description = payload.description.or(existing.description);

        Ok(existing.save(conn).await?)
    }

    async fn view(self, conn: &mut PgConnection) -> Result<WineView, DatabaseError> {
        let wine_type = Repository::<WineType>::new(&mut *conn).key_of(self.wine_type_id).await?;
        let producer = Repository::<Producer>::new(&mut *conn).key_of(self.producer_id).await?;
        let grape = Repository::<Grape>::new(&mut *conn).key_of(self.grape_id).await?;

        Ok(WineView {
            id: self.id,
            name: self.name,
            style: self.style,
            wine_type: wine_type.map(TypeRef::from),
            producer: producer.map(NameRef::from),
            grape: grape.map(NameRef::from),
            year_produced: self.year_produced,
            alcohol_percentage: self.alcohol_percentage,
            volume: self.volume,
            picture: self.picture,
            description: self.description,
        })
    }
}
