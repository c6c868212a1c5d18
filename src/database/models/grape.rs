use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Grape {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub region_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewGrape {
    pub name: String,
    pub description: Option<String>,
    pub region_id: Option<i32>,
}

impl Entity for Grape {
    const TABLE: &'static str = "grapes";
    const KEY_COLUMN: &'static str = "name";
    const LABEL: &'static str = "Grape";

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> &str {
        &self.name
    }
}

impl Grape {
    pub async fn insert(conn: &mut PgConnection, new: NewGrape) -> Result<Grape, DatabaseError> {
        let row = sqlx::query_as::<_, Grape>(
            "INSERT INTO grapes (name, description, region_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(new.name)
        .bind(new.description)
        .bind(new.region_id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    pub async fn save(&self, conn: &mut PgConnection) -> Result<Grape, DatabaseError> {
        let row = sqlx::query_as::<_, Grape>(
            "UPDATE grapes SET name = $1, description = $2, region_id = $3 WHERE id = $4 RETURNING *",
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
