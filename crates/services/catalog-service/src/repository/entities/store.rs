//! Store database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Store;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Store {
    fn from(model: Model) -> Self {
        Store {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            address: model.address,
            phone: model.phone,
            image_url: model.image_url,
            latitude: model.latitude,
            longitude: model.longitude,
            rating: model.rating,
        }
    }
}
