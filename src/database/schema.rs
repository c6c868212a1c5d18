use sqlx::PgConnection;
use tracing::info;

use crate::database::manager::DatabaseError;

/// Catalog tables in creation order
pub const TABLES: &[&str] = &[
    "countries",
    "regions",
    "producers",
    "grapes",
    "wine_types",
    "wines",
    "users",
];

/// Table definitions in dependency order. Business keys are UNIQUE and every
/// foreign key detaches children when its parent is deleted.
const CREATE_TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS countries (
        id SERIAL PRIMARY KEY,
        name VARCHAR(64) NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS regions (
        id SERIAL PRIMARY KEY,
        name VARCHAR(128) NOT NULL UNIQUE,
        country_id INTEGER REFERENCES countries(id) ON DELETE SET NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS producers (
        id SERIAL PRIMARY KEY,
        name VARCHAR(128) NOT NULL UNIQUE,
        description VARCHAR(500),
        region_id INTEGER REFERENCES regions(id) ON DELETE SET NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS grapes (
        id SERIAL PRIMARY KEY,
        name VARCHAR(64) NOT NULL UNIQUE,
        description VARCHAR(500),
        region_id INTEGER REFERENCES regions(id) ON DELETE SET NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS wine_types (
        id SERIAL PRIMARY KEY,
        type VARCHAR(64) NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS wines (
        id SERIAL PRIMARY KEY,
        name VARCHAR(128) NOT NULL UNIQUE,
        style VARCHAR(128),
        wine_type_id INTEGER REFERENCES wine_types(id) ON DELETE SET NULL,
        producer_id INTEGER REFERENCES producers(id) ON DELETE SET NULL,
        grape_id INTEGER REFERENCES grapes(id) ON DELETE SET NULL,
        year_produced INTEGER,
        alcohol_percentage DOUBLE PRECISION,
        volume INTEGER,
        picture TEXT,
        description VARCHAR(500)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(128) NOT NULL UNIQUE,
        password VARCHAR(255) NOT NULL,
        email VARCHAR(128),
        role VARCHAR(32)
    )"#,
];

const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS wines",
    "DROP TABLE IF EXISTS wine_types",
    "DROP TABLE IF EXISTS grapes",
    "DROP TABLE IF EXISTS producers",
    "DROP TABLE IF EXISTS regions",
    "DROP TABLE IF EXISTS countries",
];

pub async fn create_tables(conn: &mut PgConnection) -> Result<(), DatabaseError> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    info!("Ensured {} tables exist", CREATE_TABLES.len());
    Ok(())
}

pub async fn drop_tables(conn: &mut PgConnection) -> Result<(), DatabaseError> {
    for statement in DROP_TABLES {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    info!("Dropped {} tables", DROP_TABLES.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_every_created_table_children_first() {
        let created: Vec<&str> = CREATE_TABLES
            .iter()
            .filter_map(|sql| sql.split_whitespace().nth(5))
            .collect();
        let dropped: Vec<&str> = DROP_TABLES
            .iter()
            .filter_map(|sql| sql.split_whitespace().last())
            .collect();

        assert_eq!(created, TABLES);

        let mut reversed = created.clone();
        reversed.reverse();
        assert_eq!(reversed, dropped);
    }

    #[test]
    fn wine_picture_holds_presigned_urls() {
        let wines = CREATE_TABLES
            .iter()
            .find(|sql| sql.contains("TABLE IF NOT EXISTS wines"))
            .unwrap();
        assert!(wines.contains("picture TEXT"));
    }

    #[test]
    fn business_keys_are_unique() {
        for sql in CREATE_TABLES {
            assert!(sql.contains("NOT NULL UNIQUE"), "missing unique key: {}", sql);
        }
    }
}
