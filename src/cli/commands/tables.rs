use serde_json::json;

use super::connect;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::schema;

pub async fn create_all(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = connect(config).await?;
    let mut conn = db.acquire().await?;
    schema::create_tables(&mut conn).await?;
    drop(conn);
    db.close().await;

    output_success(output_format, "Tables created", Some(json!({"tables": schema::TABLES})))
}

pub async fn drop_all(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = connect(config).await?;
    let mut conn = db.acquire().await?;
    schema::drop_tables(&mut conn).await?;
    drop(conn);
    db.close().await;

    output_success(output_format, "Tables dropped", Some(json!({"tables": schema::TABLES})))
}
