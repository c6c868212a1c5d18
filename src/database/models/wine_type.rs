use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WineType {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Entity for WineType {
    const TABLE: &'static str = "wine_types";
    const KEY_COLUMN: &'static str = "type";
    const LABEL: &'static str = "Wine type";

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> &str {
        &self.kind
    }
}

impl WineType {
    pub async fn save(&self, conn: &mut PgConnection) -> Result<WineType, DatabaseError> {
        let row = sqlx::query_as::<_, WineType>(
            "UPDATE wine_types SET type = $1 WHERE id = $2 RETURNING *",
        )
        .bind(&self.kind)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
