//! Demo data loaded when the API starts with seeding enabled.

use crate::models::{Profile, User};

pub fn demo_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: "101".to_string(),
            name: "Admin".to_string(),
        },
        Profile {
            id: "102".to_string(),
            name: "User".to_string(),
        },
    ]
}

pub fn demo_users() -> Vec<User> {
    [
        ("1", "Alice", "Silva", "alice@email.com", "101", true),
        ("2", "Bruno", "Souza", "bruno@email.com", "102", true),
        ("3", "Carla", "Oliveira", "carla@email.com", "101", false),
    ]
    .into_iter()
    .map(
        |(id, first_name, last_name, email, profile_id, is_active)| User {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            profile_id: profile_id.to_string(),
            is_active,
        },
    )
    .collect()
}
