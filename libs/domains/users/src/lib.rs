//! Users Domain
//!
//! User management over an in-memory store, with read-only profiles that
//! users reference by id.
//!
//! # Features
//!
//! - User CRUD with partial updates
//! - Paginated listing, optionally filtered by a set of profile ids
//! - Explicit activate/deactivate that rejects no-op switches
//! - Profile-existence and email-uniqueness checks, each toggleable via
//!   [`ValidationPolicy`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, query parsing, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, validation policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access, pagination (trait + in-memory impl)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::seeded();
//! let service = UserService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use error::{ErrorKind, UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateUser, PaginatedResult, Pagination, Profile, StatusUnchanged, UpdateUser,
    UpdateUserStatus, User,
};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{UserService, ValidationPolicy};
