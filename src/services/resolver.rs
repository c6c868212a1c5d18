//! Resolution of nested `{"name": ...}` references to stored rows.
//!
//! On create an unknown key becomes a new row holding only that key; on
//! update an unknown key is an error and nothing is written.

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::debug;

use super::CatalogError;
use crate::database::{DatabaseError, Entity, Repository};

/// Which request a reference arrived with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Create,
    Update,
}

/// Outcome of resolving one optional reference
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// The client did not send the reference
    Unset,
    /// The key matched a stored row
    Existing(T),
    /// Create flow only: the key matched nothing and a row must be inserted
    Transient(String),
}

/// Lookup and key-only insert by business key
#[async_trait]
pub trait KeyStore<T: Entity>: Send {
    async fn find_by_key(&mut self, key: &str) -> Result<Option<T>, DatabaseError>;
    async fn insert_key(&mut self, key: &str) -> Result<T, DatabaseError>;
}

#[async_trait]
impl<T: Entity> KeyStore<T> for PgConnection {
    async fn find_by_key(&mut self, key: &str) -> Result<Option<T>, DatabaseError> {
        Repository::<T>::new(self).find_by_name(key).await
    }

    async fn insert_key(&mut self, key: &str) -> Result<T, DatabaseError> {
        Repository::<T>::new(self).insert_key(key).await
    }
}

pub async fn resolve<T, S>(
    store: &mut S,
    key: Option<&str>,
    flow: Flow,
) -> Result<Resolution<T>, CatalogError>
where
    T: Entity,
    S: KeyStore<T> + ?Sized,
{
    let Some(key) = key else {
        return Ok(Resolution::Unset);
    };

    match store.find_by_key(key).await? {
        Some(row) => Ok(Resolution::Existing(row)),
        None => match flow {
            Flow::Create => Ok(Resolution::Transient(key.to_string())),
            Flow::Update => Err(CatalogError::RelatedEntityNotFound {
                entity: T::LABEL,
                key: key.to_string(),
            }),
        },
    }
}

impl<T: Entity> Resolution<T> {
    /// Id to store in the foreign key column, persisting a transient row first.
    pub async fn into_id<S>(self, store: &mut S) -> Result<Option<i32>, DatabaseError>
    where
        S: KeyStore<T> + ?Sized,
    {
        match self {
            Resolution::Unset => Ok(None),
            Resolution::Existing(row) => Ok(Some(row.id())),
            Resolution::Transient(key) => {
                let row = store.insert_key(&key).await?;
                debug!("Created {} {} from nested reference", T::LABEL, key);
                Ok(Some(row.id()))
            }
        }
    }
}

/// `resolve` followed by `into_id`
pub async fn resolve_id<T, S>(
    store: &mut S,
    key: Option<&str>,
    flow: Flow,
) -> Result<Option<i32>, CatalogError>
where
    T: Entity,
    S: KeyStore<T> + ?Sized,
{
    let resolution = resolve::<T, S>(store, key, flow).await?;
    Ok(resolution.into_id(store).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Country;
    use crate::testing::MemoryStore;

    fn spain() -> Country {
        Country {
            id: 1,
            name: "Spain".to_string(),
        }
    }

    #[tokio::test]
    async fn omitted_reference_is_unset() {
        let mut store = MemoryStore::with(vec![spain()]);
        let resolution = resolve::<Country, _>(&mut store, None, Flow::Create).await.unwrap();
        assert_eq!(resolution, Resolution::Unset);
        assert_eq!(store.lookups, 0);
    }

    #[tokio::test]
    async fn existing_key_attaches_without_insert() {
        let mut store = MemoryStore::with(vec![spain()]);
        let id = resolve_id::<Country, _>(&mut store, Some("Spain"), Flow::Create)
            .await
            .unwrap();
        assert_eq!(id, Some(1));
        assert_eq!(store.rows.len(), 1);
    }

    #[tokio::test]
    async fn unknown_key_on_create_inserts_exactly_one_row() {
        let mut store = MemoryStore::with(vec![spain()]);
        let resolution = resolve::<Country, _>(&mut store, Some("Portugal"), Flow::Create)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::Transient("Portugal".to_string()));
        assert_eq!(store.rows.len(), 1, "resolving alone must not write");

        let id = resolution.into_id(&mut store).await.unwrap();
        assert_eq!(id, Some(2));
        assert_eq!(store.rows.len(), 2);
        assert_eq!(store.rows[1].name, "Portugal");
    }

    #[tokio::test]
    async fn unknown_key_on_update_fails_without_writing() {
        let mut store = MemoryStore::with(vec![spain()]);
        let err = resolve_id::<Country, _>(&mut store, Some("Atlantis"), Flow::Update)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::RelatedEntityNotFound { entity: "Country", ref key } if key == "Atlantis"
        ));
        assert_eq!(store.rows.len(), 1);
    }

    #[tokio::test]
    async fn existing_key_on_update_resolves() {
        let mut store = MemoryStore::with(vec![spain()]);
        let id = resolve_id::<Country, _>(&mut store, Some("Spain"), Flow::Update)
            .await
            .unwrap();
        assert_eq!(id, Some(1));
    }
}
