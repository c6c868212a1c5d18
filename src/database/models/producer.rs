use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Producer {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub region_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewProducer {
    pub name: String,
    pub description: Option<String>,
    pub region_id: Option<i32>,
}

impl Entity for Producer {
    const TABLE: &'static str = "producers";
    const KEY_COLUMN: &'static str = "name";
    const LABEL: &'static str = "Producer";

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> &str {
        &self.name
    }
}

impl Producer {
    pub async fn insert(conn: &mut PgConnection, new: NewProducer) -> Result<Producer, DatabaseError> {
        let row = sqlx::query_as::<_, Producer>(
            "INSERT INTO producers (name, description, region_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(new.name)
        .bind(new.description)
        .bind(new.region_id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    pub async fn save(&self, conn: &mut PgConnection) -> Result<Producer, DatabaseError> {
        let row = sqlx::query_as::<_, Producer>(
            "UPDATE producers SET name = $1, description = $2, region_id = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.region_id)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
