use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: i32,
    pub name: String,
}

impl Entity for Country {
    const TABLE: &'static str = "countries";
    const KEY_COLUMN: &'static str = "name";
    const LABEL: &'static str = "Country";

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> &str {
        &self.name
    }
}

impl Country {
    pub async fn save(&self, conn: &mut PgConnection) -> Result<Country, DatabaseError> {
        let row = sqlx::query_as::<_, Country>(
            "UPDATE countries SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(&self.name)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
