use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::database::Database;
use crate::storage::ObjectStore;

/// Shared handles every handler receives through `State`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub tokens: Arc<TokenKeys>,
    /// `None` when no bucket is configured; picture uploads then answer 503
    pub storage: Option<Arc<dyn ObjectStore>>,
    pub http: reqwest::Client,
}
