use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;

/// A catalog row identified by a surrogate id and a unique business key.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Table holding the rows
    const TABLE: &'static str;
    /// Column holding the business key (`name`, `type`, `username`)
    const KEY_COLUMN: &'static str;
    /// Human readable name used in messages
    const LABEL: &'static str;

    fn id(&self) -> i32;
    fn key(&self) -> &str;
}

/// Generic reads and key-only writes over one entity table.
///
/// Holds a borrowed connection so callers decide whether the work runs
/// inside a transaction (`&mut *tx`) or on a plain pooled connection.
pub struct Repository<'c, T> {
    conn: &'c mut PgConnection,
    _phantom: std::marker::PhantomData<T>,
}

impl<'c, T: Entity> Repository<'c, T> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self {
            conn,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn find_by_name(&mut self, key: &str) -> Result<Option<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE \"{}\" = $1 LIMIT 1",
            T::TABLE,
            T::KEY_COLUMN
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(key)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&mut self, id: i32) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" WHERE id = $1", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    /// Like `find_by_name`, but a missing row is an error
    pub async fn find_404(&mut self, key: &str) -> Result<T, DatabaseError> {
        self.find_by_name(key)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} {} not found", T::LABEL, key)))
    }

    pub async fn find_all(&mut self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" ORDER BY id", T::TABLE);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&mut *self.conn).await?;
        Ok(rows)
    }

    pub async fn exists(&mut self, key: &str) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM \"{}\" WHERE \"{}\" = $1)",
            T::TABLE,
            T::KEY_COLUMN
        );
        let found: bool = sqlx::query_scalar(&sql)
            .bind(key)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(found)
    }

    /// Insert a row carrying only its business key; every other column takes its default.
    pub async fn insert_key(&mut self, key: &str) -> Result<T, DatabaseError> {
        let sql = format!(
            "INSERT INTO \"{}\" (\"{}\") VALUES ($1) RETURNING *",
            T::TABLE,
            T::KEY_COLUMN
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(key)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&mut *self.conn).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("{} #{} not found", T::LABEL, id)));
        }
        Ok(())
    }

    /// Business key of a referenced row, used when building views
    pub async fn key_of(&mut self, id: Option<i32>) -> Result<Option<String>, DatabaseError> {
        match id {
            Some(id) => Ok(self.find_by_id(id).await?.map(|row| row.key().to_string())),
            None => Ok(None),
        }
    }
}
