use serde::Serialize;
use sqlx::{FromRow, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

/// Account row. `password` holds an argon2 PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const KEY_COLUMN: &'static str = "username";
    const LABEL: &'static str = "User";

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> &str {
        &self.username
    }
}

impl User {
    pub async fn insert(conn: &mut PgConnection, new: NewUser) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, email, role) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new.username)
        .bind(new.password_hash)
        .bind(new.email)
        .bind(new.role)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
