use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{PaginatedResult, Pagination, Profile, User};
use crate::seed;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Repository trait for User and Profile persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of all users, in insertion order
    async fn get_all(&self, pagination: Pagination) -> UserResult<PaginatedResult<User>>;

    async fn get_by_id(&self, id: &str) -> UserResult<Option<User>>;

    /// Case-insensitive email lookup
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// One page of users whose profile id is in `profile_ids`
    async fn get_by_profile(
        &self,
        profile_ids: &[String],
        pagination: Pagination,
    ) -> UserResult<PaginatedResult<User>>;

    async fn get_all_profiles(&self) -> UserResult<Vec<Profile>>;

    async fn get_profile_by_id(&self, id: &str) -> UserResult<Option<Profile>>;

    /// Insert a new user or replace the one with the same id
    async fn save(&self, user: User) -> UserResult<()>;

    /// Remove a user, failing with `RecordNotFound` when the id is unknown
    async fn delete(&self, id: &str) -> UserResult<()>;
}

/// Resolve missing or zero page values and slice out one page.
pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> PaginatedResult<T> {
    let page = pagination.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
    let limit = pagination.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);
    let total = items.len();
    let offset = (page as usize - 1).saturating_mul(limit as usize);

    let data = items
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect();

    PaginatedResult {
        data,
        total,
        page,
        limit,
    }
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<User>,
    profiles: Vec<Profile>,
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Users and profiles sit behind one lock so every call sees a consistent
/// snapshot of both.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    /// Empty store: no users, no profiles
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self::with_data(Vec::new(), profiles)
    }

    pub fn with_data(users: Vec<User>, profiles: Vec<Profile>) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store { users, profiles })),
        }
    }

    /// Store preloaded with the demo profiles and users
    pub fn seeded() -> Self {
        Self::with_data(seed::demo_users(), seed::demo_profiles())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self, pagination: Pagination) -> UserResult<PaginatedResult<User>> {
        let store = self.store.read().await;
        Ok(paginate(store.users.clone(), pagination))
    }

    async fn get_by_id(&self, id: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        let email = email.to_lowercase();
        let user = store
            .users
            .iter()
            .find(|u| u.email.to_lowercase() == email)
            .cloned();
        Ok(user)
    }

    async fn get_by_profile(
        &self,
        profile_ids: &[String],
        pagination: Pagination,
    ) -> UserResult<PaginatedResult<User>> {
        let wanted: HashSet<&str> = profile_ids.iter().map(String::as_str).collect();
        let store = self.store.read().await;

        let matching: Vec<User> = store
            .users
            .iter()
            .filter(|u| wanted.contains(u.profile_id.as_str()))
            .cloned()
            .collect();

        Ok(paginate(matching, pagination))
    }

    async fn get_all_profiles(&self) -> UserResult<Vec<Profile>> {
        let store = self.store.read().await;
        Ok(store.profiles.clone())
    }

    async fn get_profile_by_id(&self, id: &str) -> UserResult<Option<Profile>> {
        let store = self.store.read().await;
        Ok(store.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, user: User) -> UserResult<()> {
        let mut store = self.store.write().await;

        match store.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                tracing::info!(user_id = %user.id, "Updated user");
                *existing = user;
            }
            None => {
                tracing::info!(user_id = %user.id, email = %user.email, "Created user");
                store.users.push(user);
            }
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> UserResult<()> {
        let mut store = self.store.write().await;

        let Some(index) = store.users.iter().position(|u| u.id == id) else {
            return Err(UserError::RecordNotFound(id.to_string()));
        };

        store.users.remove(index);
        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
