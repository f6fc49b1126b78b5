use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, PaginatedResult, Pagination, Profile, UpdateUser, User};
use crate::repository::UserRepository;

/// Toggles for the checks `create` and `update` run before persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Reject a `profileId` that does not name a stored profile
    pub require_existing_profile: bool,
    /// Reject an email already held by another user
    pub require_unique_email: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_existing_profile: true,
            require_unique_email: true,
        }
    }
}

impl ValidationPolicy {
    /// Both checks off
    pub fn permissive() -> Self {
        Self {
            require_existing_profile: false,
            require_unique_email: false,
        }
    }
}

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    policy: ValidationPolicy,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_policy(repository, ValidationPolicy::default())
    }

    pub fn with_policy(repository: R, policy: ValidationPolicy) -> Self {
        Self {
            repository: Arc::new(repository),
            policy,
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Create a user and return its id
    #[instrument(skip(self, input), fields(email = %input.email, profile_id = %input.profile_id))]
    pub async fn create(&self, input: CreateUser) -> UserResult<String> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if let Some(id) = &input.id {
            if self.repository.get_by_id(id).await?.is_some() {
                return Err(UserError::DuplicateId(id.clone()));
            }
        }
        if self.policy.require_existing_profile {
            self.ensure_profile_exists(&input.profile_id).await?;
        }
        if self.policy.require_unique_email {
            self.ensure_email_available(&input.email).await?;
        }

        let user = User::new(input);
        let id = user.id.clone();
        self.repository.save(user).await?;

        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self, pagination: Pagination) -> UserResult<PaginatedResult<User>> {
        self.repository.get_all(pagination).await
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// Apply a partial update and return the stored result
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let mut user = self.find_one(id).await?;

        if self.policy.require_existing_profile {
            if let Some(profile_id) = &input.profile_id {
                if *profile_id != user.profile_id {
                    self.ensure_profile_exists(profile_id).await?;
                }
            }
        }
        if self.policy.require_unique_email {
            if let Some(email) = &input.email {
                if email.to_lowercase() != user.email.to_lowercase() {
                    self.ensure_email_available(email).await?;
                }
            }
        }

        user.apply_update(input);
        self.repository.save(user.clone()).await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> UserResult<()> {
        self.find_one(id).await?;
        self.repository.delete(id).await
    }

    /// Set a user's active flag; switching to the current value is an error
    #[instrument(skip(self))]
    pub async fn switch_user_status(&self, id: &str, is_active: bool) -> UserResult<()> {
        let mut user = self.find_one(id).await?;
        user.switch_status(is_active)?;
        self.repository.save(user).await
    }

    pub async fn find_all_profiles(&self) -> UserResult<Vec<Profile>> {
        self.repository.get_all_profiles().await
    }

    #[instrument(skip(self))]
    pub async fn find_all_by_profiles(
        &self,
        profile_ids: &[String],
        pagination: Pagination,
    ) -> UserResult<PaginatedResult<User>> {
        self.repository
            .get_by_profile(profile_ids, pagination)
            .await
    }

    /// Fails with `ProfileNotFound` unless a profile with this id is stored
    pub async fn ensure_profile_exists(&self, profile_id: &str) -> UserResult<()> {
        match self.repository.get_profile_by_id(profile_id).await? {
            Some(_) => Ok(()),
            None => Err(UserError::ProfileNotFound(profile_id.to_string())),
        }
    }

    /// Fails with `DuplicateEmail` if any user already holds this email
    pub async fn ensure_email_available(&self, email: &str) -> UserResult<()> {
        match self.repository.get_by_email(email).await? {
            Some(_) => Err(UserError::DuplicateEmail(email.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: "Admin".to_string(),
        }
    }

    fn stored_user() -> User {
        User {
            id: "1".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Silva".to_string(),
            email: "alice@email.com".to_string(),
            profile_id: "101".to_string(),
            is_active: true,
        }
    }

    fn create_input(email: &str, profile_id: &str) -> CreateUser {
        CreateUser {
            first_name: "Dan".to_string(),
            last_name: "Lima".to_string(),
            email: email.to_string(),
            profile_id: profile_id.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_checks_profile_then_email_then_saves() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_get_profile_by_id()
            .with(eq("101"))
            .returning(|id| Ok(Some(profile(id))));
        mock_repo
            .expect_get_by_email()
            .with(eq("dan@email.com"))
            .returning(|_| Ok(None));
        mock_repo
            .expect_save()
            .withf(|u| u.email == "dan@email.com" && u.is_active)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(mock_repo);
        let id = service
            .create(create_input("dan@email.com", "101"))
            .await
            .unwrap();

        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_create_unknown_profile_never_saves() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_get_profile_by_id()
            .returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let err = service
            .create(create_input("dan@email.com", "999"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::ProfileNotFound(id) if id == "999"));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_never_saves() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_get_profile_by_id()
            .returning(|id| Ok(Some(profile(id))));
        mock_repo
            .expect_get_by_email()
            .returning(|_| Ok(Some(stored_user())));
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let err = service
            .create(create_input("alice@email.com", "101"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_permissive_policy_skips_lookups() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_get_profile_by_id().never();
        mock_repo.expect_get_by_email().never();
        mock_repo.expect_save().times(1).returning(|_| Ok(()));

        let service = UserService::with_policy(mock_repo, ValidationPolicy::permissive());
        assert!(
            service
                .create(create_input("alice@email.com", "999"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_create_rejects_taken_id() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_get_by_id()
            .with(eq("1"))
            .returning(|_| Ok(Some(stored_user())));
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let err = service
            .create(CreateUser {
                id: Some("1".to_string()),
                ..create_input("new@email.com", "101")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::DuplicateId(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_repository() {
        let service = UserService::new(MockUserRepository::new());

        let err = service
            .create(create_input("not-an-email", "101"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_same_email_different_case_skips_uniqueness() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_get_by_id()
            .returning(|_| Ok(Some(stored_user())));
        mock_repo.expect_get_by_email().never();
        mock_repo.expect_save().times(1).returning(|_| Ok(()));

        let service = UserService::new(mock_repo);
        let user = service
            .update(
                "1",
                UpdateUser {
                    email: Some("ALICE@email.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.email, "ALICE@email.com");
    }

    #[tokio::test]
    async fn test_remove_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = UserService::new(mock_repo);
        let err = service.remove("999").await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(id) if id == "999"));
    }

    #[tokio::test]
    async fn test_switch_status_same_value_does_not_save() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_get_by_id()
            .returning(|_| Ok(Some(stored_user())));
        mock_repo.expect_save().never();

        let service = UserService::new(mock_repo);
        let err = service.switch_user_status("1", true).await.unwrap_err();

        assert!(matches!(err, UserError::StatusUnchanged(_)));
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_get_all()
            .returning(|_| Err(UserError::Internal("storage offline".to_string())));

        let service = UserService::new(mock_repo);
        let err = service.find_all(Pagination::default()).await.unwrap_err();

        assert!(matches!(err, UserError::Internal(_)));
    }
}
