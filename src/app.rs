use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::auth::TokenKeys;
use crate::config::{AppConfig, SecurityConfig};
use crate::database::models::{Country, Grape, Producer, Region, Wine, WineType};
use crate::database::{schema, Database};
use crate::handlers::{protected, public, system};
use crate::middleware::require_auth;
use crate::services::CatalogResource;
use crate::state::AppState;
use crate::storage::{ObjectStore, S3Store};

/// Build the router. Mutating routes sit behind the auth route layer;
/// reads, registration and login are public.
pub fn app(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), require_auth);

    let protected_routes = Router::new()
        .merge(catalog_writes::<Country>())
        .merge(catalog_writes::<Region>())
        .merge(catalog_writes::<Producer>())
        .merge(catalog_writes::<Grape>())
        .merge(catalog_writes::<WineType>())
        .merge(wine_writes())
        .merge(protected_auth_routes())
        .route_layer(auth);

    let public_routes = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(catalog_reads::<Country>())
        .merge(catalog_reads::<Region>())
        .merge(catalog_reads::<Producer>())
        .merge(catalog_reads::<Grape>())
        .merge(catalog_reads::<WineType>())
        .merge(catalog_reads::<Wine>())
        .merge(public_auth_routes());

    let mut router = protected_routes
        .merge(public_routes)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn catalog_reads<T: CatalogResource>() -> Router<AppState> {
    use public::catalog;

    Router::new()
        .route(&format!("/api/{}", T::COLLECTION), get(catalog::list::<T>))
        .route(&format!("/api/{}/:key", T::COLLECTION), get(catalog::get::<T>))
}

fn catalog_writes<T: CatalogResource>() -> Router<AppState> {
    use protected::catalog;

    Router::new()
        .route(&format!("/api/{}", T::COLLECTION), post(catalog::create::<T>))
        .route(
            &format!("/api/{}/:key", T::COLLECTION),
            patch(catalog::update::<T>)
                .put(catalog::update::<T>)
                .delete(catalog::delete::<T>),
        )
}

fn wine_writes() -> Router<AppState> {
    use protected::{catalog, wines};

    Router::new()
        .route("/api/wines", post(wines::create))
        .route(
            "/api/wines/:key",
            patch(wines::update)
                .put(wines::update)
                .delete(catalog::delete::<Wine>),
        )
}

fn public_auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/user/:username", get(auth::get_user))
}

fn protected_auth_routes() -> Router<AppState> {
    use protected::auth;

    Router::new()
        .route("/api/logout", post(auth::logout))
        .route("/api/user/:username", delete(auth::delete_user))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Assemble state from config, create tables when configured to, and serve until ctrl-c.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    config.validate()?;

    let db = Database::connect_lazy(&config.database)?;
    if config.database.auto_migrate {
        migrate(&db).await;
    }

    let tokens = TokenKeys::from_config(&config.security)?;
    let storage = S3Store::from_config(&config.storage)
        .await
        .map(|store| Arc::new(store) as Arc<dyn ObjectStore>);
    if storage.is_none() {
        warn!("AWS_BUCKET not set; picture uploads are disabled");
    }

    let address = config.server_address();
    let state = AppState {
        config: Arc::new(config),
        db: db.clone(),
        tokens: Arc::new(tokens),
        storage,
        http: reqwest::Client::new(),
    };

    let listener = TcpListener::bind(&address).await?;
    info!("Winetime API listening on http://{}", address);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

/// Startup table creation; a database that is down only costs a warning,
/// `/health` reports it until it comes back.
async fn migrate(db: &Database) {
    let result = match db.acquire().await {
        Ok(mut conn) => schema::create_tables(&mut conn).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        warn!("Skipping table creation: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
