use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

/// Default bottle size in millilitres
pub const DEFAULT_VOLUME: i32 = 750;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Wine {
    pub id: i32,
    pub name: String,
    pub style: Option<String>,
    pub wine_type_id: Option<i32>,
    pub producer_id: Option<i32>,
    pub grape_id: Option<i32>,
    pub year_produced: Option<i32>,
    pub alcohol_percentage: Option<f64>,
    pub volume: Option<i32>,
    pub picture: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewWine {
    pub name: String,
    pub style: Option<String>,
    pub wine_type_id: Option<i32>,
    pub producer_id: Option<i32>,
    pub grape_id: Option<i32>,
    pub year_produced: Option<i32>,
    pub alcohol_percentage: Option<f64>,
    pub volume: Option<i32>,
    pub picture: Option<String>,
    pub description: Option<String>,
}

impl Entity for Wine {
    const TABLE: &'static str = "wines";
    const KEY_COLUMN: &'static str = "name";
    const LABEL: &'static str = "Wine";

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> &str {
        &self.name
    }
}

impl Wine {
    pub async fn insert(conn: &mut PgConnection, new: NewWine) -> Result<Wine, DatabaseError> {
        let row = sqlx::query_as::<_, Wine>(
            r#"INSERT INTO wines
                (name, style, wine_type_id, producer_id, grape_id, year_produced,
                 alcohol_percentage, volume, picture, description)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING *"#,
        )
        .bind(new.name)
        .bind(new.style)
        .bind(new.wine_type_id)
        .bind(new.producer_id)
        .bind(new.grape_id)
        .bind(new.year_produced)
        .bind(new.alcohol_percentage)
        .bind(new.volume)
        .bind(new.picture)
        .bind(new.description)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    pub async fn save(&self, conn: &mut PgConnection) -> Result<Wine, DatabaseError> {
        let row = sqlx::query_as::<_, Wine>(
            r#"UPDATE wines SET
                name = $1, style = $2, wine_type_id = $3, producer_id = $4, grape_id = $5,
                year_produced = $6, alcohol_percentage = $7, volume = $8, picture = $9,
                description = $10
               WHERE id = $11
               RETURNING *"#,
        )
        .bind(&self.name)
        .bind(&self.style)
        .bind(self.wine_type_id)
        .bind(self.producer_id)
        .bind(self.grape_id)
        .bind(self.year_produced)
        .bind(self.alcohol_percentage)
        .bind(self.volume)
        .bind(&self.picture)
        .bind(&self.description)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
