use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, immutable after creation
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all users (case-insensitive)
    pub email: String,
    /// Id of the profile this user belongs to
    pub profile_id: String,
    pub is_active: bool,
}

/// Read-only reference entity that users point to via `profileId`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// Optional client-supplied id; a random one is generated when absent
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub profile_id: String,
    /// Defaults to `true`
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// DTO for a partial update. Only fields that are present are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub profile_id: Option<String>,
}

/// DTO for switching a user's active flag
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStatus {
    /// New status; must differ from the current one
    pub is_active: bool,
}

/// Page request. Missing values are resolved by the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}

/// One page of results plus the metadata needed to navigate the rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    /// Count of all matching records, not just this page
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

/// Response body for a created user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedUserResponse {
    pub id: String,
}

/// Response body for an updated user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatedUserResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Returned by [`User::switch_status`] when the user already holds the requested status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("User is already {}", status_label(.is_active))]
pub struct StatusUnchanged {
    pub is_active: bool,
}

fn status_label(is_active: &bool) -> &'static str {
    if *is_active { "active" } else { "inactive" }
}

impl User {
    /// Build a user from creation input, generating an id when none was supplied.
    pub fn new(input: CreateUser) -> Self {
        Self {
            id: input.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            profile_id: input.profile_id,
            is_active: input.is_active.unwrap_or(true),
        }
    }

    /// Overwrite every field present in `update`; absent fields are left untouched.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(profile_id) = update.profile_id {
            self.profile_id = profile_id;
        }
    }

    /// Set `is_active`, refusing to "switch" to the value already held.
    pub fn switch_status(&mut self, is_active: bool) -> Result<(), StatusUnchanged> {
        if self.is_active == is_active {
            return Err(StatusUnchanged { is_active });
        }
        self.is_active = is_active;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateUser {
        CreateUser {
            first_name: "Alice".to_string(),
            last_name: "Silva".to_string(),
            email: "alice@email.com".to_string(),
            profile_id: "101".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_generates_id_and_defaults_to_active() {
        let a = User::new(create_input());
        let b = User::new(create_input());

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(a.is_active);
        assert_eq!(a.first_name, "Alice");
        assert_eq!(a.profile_id, "101");
    }

    #[test]
    fn test_new_keeps_supplied_id_and_status() {
        let user = User::new(CreateUser {
            id: Some("42".to_string()),
            is_active: Some(false),
            ..create_input()
        });

        assert_eq!(user.id, "42");
        assert!(!user.is_active);
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut user = User::new(create_input());
        let before = user.clone();

        user.apply_update(UpdateUser {
            first_name: Some("Alicia".to_string()),
            ..Default::default()
        });

        assert_eq!(user.first_name, "Alicia");
        assert_eq!(user.last_name, before.last_name);
        assert_eq!(user.email, before.email);
        assert_eq!(user.profile_id, before.profile_id);
        assert_eq!(user.is_active, before.is_active);
        assert_eq!(user.id, before.id);
    }

    #[test]
    fn test_apply_update_accepts_every_field() {
        let mut user = User::new(create_input());
        user.apply_update(UpdateUser {
            first_name: Some("Bruno".to_string()),
            last_name: Some("Souza".to_string()),
            email: Some("bruno@email.com".to_string()),
            profile_id: Some("102".to_string()),
        });

        assert_eq!(user.first_name, "Bruno");
        assert_eq!(user.last_name, "Souza");
        assert_eq!(user.email, "bruno@email.com");
        assert_eq!(user.profile_id, "102");
    }

    #[test]
    fn test_switch_status_rejects_same_value() {
        let mut user = User::new(create_input());

        let err = user.switch_status(true).unwrap_err();
        assert_eq!(err, StatusUnchanged { is_active: true });
        assert_eq!(err.to_string(), "User is already active");
        assert!(user.is_active);
    }

    #[test]
    fn test_switch_status_toggles() {
        let mut user = User::new(create_input());

        user.switch_status(false).unwrap();
        assert!(!user.is_active);
        assert_eq!(
            user.switch_status(false).unwrap_err().to_string(),
            "User is already inactive"
        );

        user.switch_status(true).unwrap();
        assert!(user.is_active);
    }

    #[test]
    fn test_create_user_validation() {
        assert!(create_input().validate().is_ok());

        let bad_email = CreateUser {
            email: "not-an-email".to_string(),
            ..create_input()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = CreateUser {
            first_name: String::new(),
            ..create_input()
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(User::new(create_input())).unwrap();
        assert_eq!(json["firstName"], "Alice");
        assert_eq!(json["profileId"], "101");
        assert_eq!(json["isActive"], true);

        let input: CreateUser = serde_json::from_value(serde_json::json!({
            "firstName": "Carla",
            "lastName": "Oliveira",
            "email": "carla@email.com",
            "profileId": "101"
        }))
        .unwrap();
        assert_eq!(input.is_active, None);
        assert_eq!(input.id, None);
    }
}
