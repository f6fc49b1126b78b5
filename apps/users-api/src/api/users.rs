//! Users API routes

use axum::Router;
use domain_users::{handlers, seed, InMemoryUserRepository, UserService};

use crate::config::UsersConfig;

/// Create users router
pub fn router(config: &UsersConfig) -> Router {
    let repository = if config.seed_demo_data {
        InMemoryUserRepository::seeded()
    } else {
        InMemoryUserRepository::with_profiles(seed::demo_profiles())
    };
    let service = UserService::with_policy(repository, config.validation);
    handlers::router(service)
}
