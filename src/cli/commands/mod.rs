pub mod populate;
pub mod tables;

use crate::config::AppConfig;
use crate::database::Database;

/// Connect eagerly so a bad DATABASE_URL fails before any work starts
async fn connect(config: &AppConfig) -> anyhow::Result<Database> {
    config.validate()?;
    Ok(Database::connect(&config.database).await?)
}
