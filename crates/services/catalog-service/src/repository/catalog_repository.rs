//! Store and product repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Statement,
};

use super::entities::product::{self, Entity as ProductEntity};
use super::entities::store::{self, Entity as StoreEntity};
use common::{AppError, AppResult};
use domain::{Product, Store, StoreMatch, StoreProduct};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Catalog repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Check connectivity of the underlying store
    async fn ping(&self) -> AppResult<()>;

    /// List every store
    async fn list_stores(&self) -> AppResult<Vec<Store>>;

    /// Find store by ID
    async fn find_store(&self, id: i32) -> AppResult<Option<Store>>;

    /// Find the stores whose IDs are in `ids`
    async fn find_stores_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Store>>;

    /// Products of a store joined with the store summary, ordered by name
    async fn list_store_products(&self, store_id: i32) -> AppResult<Vec<StoreProduct>>;

    /// Find product by ID
    async fn find_product(&self, id: i32) -> AppResult<Option<Product>>;

    /// Up to `limit` distinct product names in random order
    async fn random_product_names(&self, limit: u64) -> AppResult<Vec<String>>;

    /// Distinct non-null product categories
    async fn product_categories(&self) -> AppResult<Vec<String>>;

    /// Stores owning at least one product whose name, description or
    /// category matches any of the wildcard `patterns` (case-insensitive),
    /// each with the list of its matching products.
    async fn find_stores_with_matching_products(
        &self,
        patterns: Vec<String>,
    ) -> AppResult<Vec<StoreMatch>>;
}

/// Concrete implementation of CatalogRepository backed by PostgreSQL
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Product predicate: any searchable field ILIKE any pattern.
pub(crate) fn product_matches_any(patterns: &[String]) -> Condition {
    let fields = [
        product::Column::Name,
        product::Column::Description,
        product::Column::Category,
    ];

    patterns.iter().fold(Condition::any(), |condition, pattern| {
        fields.iter().fold(condition, |condition, field| {
            condition.add(Expr::col((ProductEntity, *field)).ilike(pattern.as_str()))
        })
    })
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn list_stores(&self) -> AppResult<Vec<Store>> {
        let models = StoreEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn find_store(&self, id: i32) -> AppResult<Option<Store>> {
        let result = StoreEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Store::from))
    }

    async fn find_stores_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Store>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StoreEntity::find()
            .filter(store::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Store::from).collect())
    }

    async fn list_store_products(&self, store_id: i32) -> AppResult<Vec<StoreProduct>> {
        let rows = ProductEntity::find()
            .find_also_related(StoreEntity)
            .filter(product::Column::StoreId.eq(store_id))
            .order_by_asc(product::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|(product, store)| {
                store.map(|store| StoreProduct::new(product.into(), &store.into()))
            })
            .collect())
    }

    async fn find_product(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn random_product_names(&self, limit: u64) -> AppResult<Vec<String>> {
        let names = ProductEntity::find()
            .select_only()
            .column(product::Column::Name)
            .filter(product::Column::Name.is_not_null())
            .group_by(product::Column::Name)
            .order_by(Expr::cust("RANDOM()"), Order::Asc)
            .limit(limit)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(names)
    }

    async fn product_categories(&self) -> AppResult<Vec<String>> {
        let categories = ProductEntity::find()
            .select_only()
            .column(product::Column::Category)
            .filter(product::Column::Category.is_not_null())
            .distinct()
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(categories)
    }

    async fn find_stores_with_matching_products(
        &self,
        patterns: Vec<String>,
    ) -> AppResult<Vec<StoreMatch>> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        // The filter sits on the joined product rows, so stores without a
        // matching product drop out and only matching products are grouped.
        let rows = StoreEntity::find()
            .find_with_related(ProductEntity)
            .filter(product_matches_any(&patterns))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(store, products)| StoreMatch {
                store: store.into(),
                matching_products: Some(products.into_iter().map(Product::from).collect()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::PostgresQueryBuilder;
    use sea_orm::QueryTrait;

    fn search_sql(patterns: &[&str]) -> String {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        StoreEntity::find()
            .find_with_related(ProductEntity)
            .filter(product_matches_any(&patterns))
            .into_query()
            .to_string(PostgresQueryBuilder)
    }

    #[test]
    fn test_single_pattern_checks_all_three_fields() {
        let sql = search_sql(&["%pizza%"]);

        assert!(sql.contains(r#"LEFT JOIN "products""#));
        assert!(sql.contains(r#""products"."name" ILIKE '%pizza%'"#));
        assert!(sql.contains(r#""products"."description" ILIKE '%pizza%'"#));
        assert!(sql.contains(r#""products"."category" ILIKE '%pizza%'"#));
        assert_eq!(sql.matches("ILIKE").count(), 3);
    }

    #[test]
    fn test_word_patterns_are_or_combined() {
        let sql = search_sql(&["%choco%", "%late%"]);

        assert_eq!(sql.matches("ILIKE").count(), 6);
        assert!(sql.contains("'%choco%'"));
        assert!(sql.contains("'%late%'"));
        assert!(!sql.contains(" AND "));
    }
}
