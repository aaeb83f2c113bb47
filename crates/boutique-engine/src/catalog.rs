//! # Catalog
//!
//! Product management and the dashboard aggregates. Input validation happens
//! here, before anything touches storage; the database CHECK constraints are
//! a second line of defense, not the first.

use tracing::info;

use crate::error::{EngineError, EngineResult};
use boutique_core::{validation, Money, Product, LOW_STOCK_THRESHOLD};
use boutique_db::{Database, ProductRepository};

/// Catalog operations over the product store.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: ProductRepository,
}

impl Catalog {
    pub fn new(db: &Database) -> Self {
        Catalog {
            products: db.products(),
        }
    }

    /// Creates a catalog entry. Name is trimmed; price must be positive and
    /// stock non-negative.
    pub async fn create_product(
        &self,
        name: &str,
        price: i64,
        quantity: i64,
    ) -> EngineResult<Product> {
        let name = validation::validate_product_name(name)?;
        validation::validate_price(price)?;
        validation::validate_stock_quantity(quantity)?;

        let product = self.products.insert(&name, price, quantity).await?;
        info!(id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn get_product(&self, id: i64) -> EngineResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "product",
                id,
            })
    }

    pub async fn list_products(&self) -> EngineResult<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    /// Replaces name, price, and stock of an existing product and returns
    /// the updated row.
    pub async fn update_product(
        &self,
        id: i64,
        name: &str,
        price: i64,
        quantity: i64,
    ) -> EngineResult<Product> {
        let name = validation::validate_product_name(name)?;
        validation::validate_price(price)?;
        validation::validate_stock_quantity(quantity)?;

        match self.products.update(id, &name, price, quantity).await {
            Ok(()) => {
                info!(id, "product updated");
                self.get_product(id).await
            }
            Err(boutique_db::DbError::NotFound { .. }) => Err(EngineError::NotFound {
                entity: "product",
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a product from the catalog. Past receipts keep their snapshot
    /// of its name and price.
    pub async fn delete_product(&self, id: i64) -> EngineResult<()> {
        match self.products.delete(id).await {
            Ok(()) => {
                info!(id, "product deleted");
                Ok(())
            }
            Err(boutique_db::DbError::NotFound { .. }) => Err(EngineError::NotFound {
                entity: "product",
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of products below the low-stock threshold.
    pub async fn low_stock_count(&self) -> EngineResult<i64> {
        Ok(self.products.low_stock_count(LOW_STOCK_THRESHOLD).await?)
    }

    /// Σ price × stock over the whole catalog.
    pub async fn total_inventory_value(&self) -> EngineResult<Money> {
        Ok(Money::from_minor(self.products.total_inventory_value().await?))
    }

    pub async fn product_count(&self) -> EngineResult<i64> {
        Ok(self.products.count().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boutique_core::ValidationError;
    use boutique_db::DbConfig;

    async fn catalog() -> (Database, Catalog) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = Catalog::new(&db);
        (db, catalog)
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let (_db, catalog) = catalog().await;

        let err = catalog.create_product("   ", 15_000, 25).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::Required { .. })
        ));

        let err = catalog.create_product("Kids Cap", 0, 25).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::MustBePositive { .. })
        ));

        let err = catalog.create_product("Kids Cap", 10_000, -1).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::MustNotBeNegative { .. })
        ));

        assert_eq!(catalog.product_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let (_db, catalog) = catalog().await;

        let product = catalog
            .create_product("  Kids T-Shirt (Blue)  ", 15_000, 25)
            .await
            .unwrap();
        assert_eq!(product.name, "Kids T-Shirt (Blue)");
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let (_db, catalog) = catalog().await;

        let err = catalog.get_product(42).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: "product", id: 42 }));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_db, catalog) = catalog().await;

        let p = catalog.create_product("Kids Jeans", 28_000, 12).await.unwrap();

        let updated = catalog
            .update_product(p.id, " Kids Jeans (Slim) ", 30_000, 10)
            .await
            .unwrap();
        assert_eq!(updated.name, "Kids Jeans (Slim)");
        assert_eq!(updated.price, 30_000);

        catalog.delete_product(p.id).await.unwrap();
        let err = catalog.delete_product(p.id).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_dashboard_aggregates() {
        let (_db, catalog) = catalog().await;

        catalog.create_product("Kids T-Shirt (Blue)", 15_000, 25).await.unwrap();
        catalog.create_product("Kids Jacket", 45_000, 5).await.unwrap();
        catalog.create_product("Baby Romper", 25_000, 8).await.unwrap();

        assert_eq!(catalog.low_stock_count().await.unwrap(), 2);
        assert_eq!(
            catalog.total_inventory_value().await.unwrap(),
            Money::from_minor(15_000 * 25 + 45_000 * 5 + 25_000 * 8)
        );
    }
}
