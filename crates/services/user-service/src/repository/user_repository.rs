//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, User, UserChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user whose email and password both match
    async fn find_by_credentials(&self, email: &str, password: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply the set fields of `changes` to the user
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Replace the user's favorite store list, returning the stored list
    async fn set_favorite_stores(&self, id: i32, favorites: Vec<i32>) -> AppResult<Vec<i32>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Password.eq(password))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            name: Set(user.name),
            email: Set(user.email),
            gender: Set(user.gender),
            level: Set(user.level),
            password: Set(user.password),
            profile_picture: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model(id).await?.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(gender) = changes.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(level) = changes.level {
            active.level = Set(Some(level));
        }
        if let Some(password) = changes.password {
            active.password = Set(password);
        }
        if let Some(picture) = changes.profile_picture {
            active.profile_picture = Set(Some(picture));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_favorite_stores(&self, id: i32, favorites: Vec<i32>) -> AppResult<Vec<i32>> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.favorite_stores = Set(Some(favorites));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(model.favorite_stores.unwrap_or_default())
    }
}
