//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// Student account.
///
/// Passwords are stored and compared as given by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub level: Option<i32>,
    #[serde(skip_serializing)]
    pub password: String,
    /// Public path of the uploaded profile picture (`/uploads/...`)
    pub profile_picture: Option<String>,
    /// Identifiers of the stores this user marked as favorite
    pub favorite_stores: Vec<i32>,
}

impl User {
    /// Check if a store is in the user's favorites
    pub fn has_favorite(&self, store_id: i32) -> bool {
        self.favorite_stores.contains(&store_id)
    }

    /// Favorites list with `store_id` appended
    pub fn with_favorite(&self, store_id: i32) -> Vec<i32> {
        let mut favorites = self.favorite_stores.clone();
        favorites.push(store_id);
        favorites
    }

    /// Favorites list with every occurrence of `store_id` removed
    pub fn without_favorite(&self, store_id: i32) -> Vec<i32> {
        self.favorite_stores
            .iter()
            .copied()
            .filter(|id| *id != store_id)
            .collect()
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
    pub level: Option<i32>,
    pub password: String,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<i32>,
    pub password: Option<String>,
    pub profile_picture: Option<String>,
}

impl UserChanges {
    /// True when no field would be changed
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.gender.is_none()
            && self.level.is_none()
            && self.password.is_none()
            && self.profile_picture.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: i32,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    pub gender: Option<String>,
    /// Academic level (1-4)
    pub level: Option<i32>,
    pub profile_picture: Option<String>,
    pub favorite_stores: Vec<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            gender: user.gender,
            level: user.level,
            profile_picture: user.profile_picture,
            favorite_stores: user.favorite_stores,
        }
    }
}

/// Public profile view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub gender: Option<String>,
    pub level: Option<i32>,
    pub profile_picture: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
            gender: user.gender,
            level: user.level,
            profile_picture: user.profile_picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(favorites: Vec<i32>) -> User {
        User {
            id: 1,
            name: "Mona".to_string(),
            email: "mona@example.com".to_string(),
            gender: None,
            level: Some(2),
            password: "secret123".to_string(),
            profile_picture: None,
            favorite_stores: favorites,
        }
    }

    #[test]
    fn test_favorites_helpers() {
        let user = user(vec![3, 5]);
        assert!(user.has_favorite(3));
        assert!(!user.has_favorite(4));
        assert_eq!(user.with_favorite(4), vec![3, 5, 4]);
        assert_eq!(user.without_favorite(3), vec![5]);
    }

    #[test]
    fn test_password_is_never_serialized() {
        let json = serde_json::to_value(user(vec![])).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "mona@example.com");
    }

    #[test]
    fn test_empty_changes() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            gender: Some("female".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
