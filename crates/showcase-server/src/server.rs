//! Application state and router assembly.

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use showcase_auth::{AuthService, AuthState, InMemoryUserStore, JwtService, UserStore};
use showcase_db_memory::InMemoryProjectStore;
use showcase_storage::ProjectStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::bootstrap::seed_identities;
use crate::cache::ListingCache;
use crate::catalog::{ListingService, MutationService};
use crate::config::AppConfig;
use crate::handlers;

/// Shared application state; cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub cache: Arc<ListingCache>,
    pub listing: Arc<ListingService>,
    pub mutations: Arc<MutationService>,
    pub auth: Arc<AuthService>,
    pub auth_state: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth_state.clone()
    }
}

/// Builds the full application: stores, cache, services, seeding, routes.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let store: Arc<dyn ProjectStore> = Arc::new(InMemoryProjectStore::new());
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());

    let cache = Arc::new(
        ListingCache::new(config.cache.capacity).with_ttl(config.cache.ttl()),
    );

    let jwt = Arc::new(JwtService::new(
        &config.auth.signing_key,
        config.auth.leeway_secs,
    ));

    seed_identities(&users, &config.bootstrap).await?;

    let state = AppState {
        listing: Arc::new(ListingService::new(
            Arc::clone(&store),
            Arc::clone(&cache),
        )),
        mutations: Arc::new(MutationService::new(
            Arc::clone(&store),
            Arc::clone(&cache),
        )),
        auth: Arc::new(AuthService::new(users, Arc::clone(&jwt), &config.auth)),
        auth_state: AuthState::new(jwt),
        store,
        cache,
    };

    tracing::info!(
        backend = state.store.backend_name(),
        cache_ttl_secs = config.cache.ttl_secs,
        "application assembled"
    );

    Ok(router(state))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(handlers::projects::get_project).delete(handlers::projects::delete_project),
        )
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
