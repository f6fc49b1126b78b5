//! API routes module

pub mod users;

use axum::Router;

use crate::config::Config;

/// Create all API routes
pub fn routes(config: &Config) -> Router {
    Router::new().nest("/users", users::router(&config.users))
}
