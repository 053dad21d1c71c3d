//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub gender: Option<String>,
    pub level: Option<i32>,
    pub password: String,
    pub profile_picture: Option<String>,
    /// Store IDs (NULL until the first favorite is added)
    pub favorite_stores: Option<Vec<i32>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            gender: model.gender,
            level: model.level,
            password: model.password,
            profile_picture: model.profile_picture,
            favorite_stores: model.favorite_stores.unwrap_or_default(),
        }
    }
}
