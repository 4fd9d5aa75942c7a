pub mod auth;
pub mod error;
pub mod handler;

use crate::domain::ports::InfoStore;
use auth::UserRegistry;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InfoStore>,
    pub users: Arc<UserRegistry>,
}

impl AppState {
    pub fn new(store: Arc<dyn InfoStore>, users: UserRegistry) -> Self {
        Self {
            store,
            users: Arc::new(users),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/info", get(handler::get_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ))
        .with_state(state)
}
