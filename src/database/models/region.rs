use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Region {
    pub id: i32,
    pub name: String,
    pub country_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewRegion {
    pub name: String,
    pub country_id: Option<i32>,
}

impl Entity for Region {
    const TABLE: &'static str = "regions";
    const KEY_COLUMN: &'static str = "name";
    const LABEL: &'static str = "Region";

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> &str {
        &self.name
    }
}

impl Region {
    pub async fn insert(conn: &mut PgConnection, new: NewRegion) -> Result<Region, DatabaseError> {
        let row = sqlx::query_as::<_, Region>(
            "INSERT INTO regions (name, country_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(new.name)
        .bind(new.country_id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    pub async fn save(&self, conn: &mut PgConnection) -> Result<Region, DatabaseError> {
        let row = sqlx::query_as::<_, Region>(
            "UPDATE regions SET name = $1, country_id = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&self.name)
        .bind(self.country_id)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
