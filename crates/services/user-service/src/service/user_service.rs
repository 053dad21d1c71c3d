//! User service - Handles account and favorites use cases.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, User, UserChanges};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Result of a profile update.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    /// The user after the update
    pub user: User,
    /// Picture path that was replaced by a new upload, if any
    pub replaced_picture: Option<String>,
}

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; fails when the email is taken
    async fn signup(&self, user: NewUser) -> AppResult<User>;

    /// Authenticate by email and password
    async fn login(&self, email: &str, password: &str) -> AppResult<User>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// Update the profile of the user identified by email
    async fn update_user(&self, email: &str, changes: UserChanges) -> AppResult<ProfileUpdate>;

    /// Add a store to the user's favorites, returning the new list
    async fn add_favorite(&self, email: &str, store_id: i32) -> AppResult<Vec<i32>>;

    /// Remove a store from the user's favorites, returning the new list
    async fn remove_favorite(&self, email: &str, store_id: i32) -> AppResult<Vec<i32>>;

    /// Favorite store IDs (empty for unknown users)
    async fn favorite_store_ids(&self, email: &str) -> AppResult<Vec<i32>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn require_user(&self, email: &str) -> AppResult<User> {
        self.repo.find_by_email(email).await?.ok_or_not_found("User")
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn signup(&self, user: NewUser) -> AppResult<User> {
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::validation("Email already registered"));
        }

        let created = self.repo.create(user).await?;
        tracing::info!(user_id = created.id, "User registered");
        Ok(created)
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        self.repo
            .find_by_credentials(email, password)
            .await?
            .ok_or(AppError::InvalidCredentials)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.require_user(email).await
    }

    async fn update_user(&self, email: &str, changes: UserChanges) -> AppResult<ProfileUpdate> {
        if changes.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }

        let current = self.require_user(email).await?;
        let replaced_picture = if changes.profile_picture.is_some() {
            current.profile_picture
        } else {
            None
        };

        let user = self.repo.update(current.id, changes).await?;
        Ok(ProfileUpdate {
            user,
            replaced_picture,
        })
    }

    async fn add_favorite(&self, email: &str, store_id: i32) -> AppResult<Vec<i32>> {
        let user = self.require_user(email).await?;
        if user.has_favorite(store_id) {
            return Err(AppError::validation("Store already in favorites"));
        }

        self.repo
            .set_favorite_stores(user.id, user.with_favorite(store_id))
            .await
    }

    async fn remove_favorite(&self, email: &str, store_id: i32) -> AppResult<Vec<i32>> {
        let user = self.require_user(email).await?;
        if !user.has_favorite(store_id) {
            return Err(AppError::validation("Store not in favorites"));
        }

        self.repo
            .set_favorite_stores(user.id, user.without_favorite(store_id))
            .await
    }

    async fn favorite_store_ids(&self, email: &str) -> AppResult<Vec<i32>> {
        let user = self.repo.find_by_email(email).await?;
        Ok(user.map(|u| u.favorite_stores).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::{always, eq};

    use crate::repository::MockUserRepository;

    fn test_user(favorites: Vec<i32>) -> User {
        User {
            id: 7,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            gender: Some("male".to_string()),
            level: Some(3),
            password: "password123".to_string(),
            profile_picture: Some("/uploads/old.png".to_string()),
            favorite_stores: favorites,
        }
    }

    fn new_user() -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            gender: None,
            level: Some(3),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Ok(test_user(vec![])));

        let service = UserManager::new(Arc::new(repo));
        let user = service.signup(new_user()).await.unwrap();

        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(test_user(vec![]))));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.signup(new_user()).await;

        assert!(matches!(result, Err(AppError::Validation(ref m)) if m == "Email already registered"));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_credentials().returning(|_, _| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.login("test@example.com", "nope").await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .update_user("test@example.com", UserChanges::default())
            .await;

        assert!(matches!(result, Err(AppError::Validation(ref m)) if m == "No fields to update"));
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let changes = UserChanges {
            name: Some("New".to_string()),
            ..Default::default()
        };
        let result = service.update_user("ghost@example.com", changes).await;

        assert!(matches!(result, Err(AppError::NotFound(ref e)) if e == "User"));
    }

    #[tokio::test]
    async fn test_update_reports_replaced_picture() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(test_user(vec![]))));
        repo.expect_update()
            .with(eq(7), always())
            .returning(|_, changes| {
                let mut user = test_user(vec![]);
                user.profile_picture = changes.profile_picture;
                Ok(user)
            });

        let service = UserManager::new(Arc::new(repo));
        let changes = UserChanges {
            profile_picture: Some("/uploads/new.png".to_string()),
            ..Default::default()
        };
        let update = service.update_user("test@example.com", changes).await.unwrap();

        assert_eq!(update.user.profile_picture.as_deref(), Some("/uploads/new.png"));
        assert_eq!(update.replaced_picture.as_deref(), Some("/uploads/old.png"));
    }

    #[tokio::test]
    async fn test_update_without_picture_keeps_old_file() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(test_user(vec![]))));
        repo.expect_update()
            .returning(|_, _| Ok(test_user(vec![])));

        let service = UserManager::new(Arc::new(repo));
        let changes = UserChanges {
            level: Some(4),
            ..Default::default()
        };
        let update = service.update_user("test@example.com", changes).await.unwrap();

        assert!(update.replaced_picture.is_none());
    }

    #[tokio::test]
    async fn test_add_favorite_appends_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(test_user(vec![1]))));
        repo.expect_set_favorite_stores()
            .with(eq(7), eq(vec![1, 5]))
            .times(1)
            .returning(|_, favorites| Ok(favorites));

        let service = UserManager::new(Arc::new(repo));
        let favorites = service.add_favorite("test@example.com", 5).await.unwrap();

        assert_eq!(favorites, vec![1, 5]);
    }

    #[tokio::test]
    async fn test_add_favorite_twice_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(test_user(vec![5]))));
        repo.expect_set_favorite_stores().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.add_favorite("test@example.com", 5).await;

        assert!(matches!(result, Err(AppError::Validation(ref m)) if m == "Store already in favorites"));
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(test_user(vec![1]))));
        repo.expect_set_favorite_stores().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service.remove_favorite("test@example.com", 9).await;

        assert!(matches!(result, Err(AppError::Validation(ref m)) if m == "Store not in favorites"));
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(test_user(vec![1, 9]))));
        repo.expect_set_favorite_stores()
            .with(eq(7), eq(vec![1]))
            .returning(|_, favorites| Ok(favorites));

        let service = UserManager::new(Arc::new(repo));
        let favorites = service.remove_favorite("test@example.com", 9).await.unwrap();

        assert_eq!(favorites, vec![1]);
    }

    #[tokio::test]
    async fn test_favorites_of_unknown_user_are_empty() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let favorites = service.favorite_store_ids("ghost@example.com").await.unwrap();

        assert!(favorites.is_empty());
    }
}
