//! Product ledger operations.

use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use sea_orm::sea_query::Expr;

use crate::{
    EngineError, NewProductCmd, Product, ResultEngine, products, voucher_items,
};

use super::{Engine, normalize_optional_text, with_tx};

impl Engine {
    /// Create a product ledger entry. The current quantity starts at the
    /// opening balance.
    pub async fn new_product(&self, cmd: NewProductCmd) -> ResultEngine<Product> {
        let product_id = cmd.product_id.trim().to_string();
        if product_id.is_empty() {
            return Err(EngineError::InvalidId(
                "product id must not be empty".to_string(),
            ));
        }
        if cmd.initial_quantity_minor < 0 {
            return Err(EngineError::InvalidQuantity(
                "initial quantity must be >= 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            if products::Entity::find_by_id(product_id.as_str())
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(product_id));
            }

            let mut product = Product::new(product_id, cmd.name, cmd.initial_quantity_minor);
            product.minimum_threshold_minor = cmd.minimum_threshold_minor;
            product.maximum_threshold_minor = cmd.maximum_threshold_minor;
            product.unit_price_minor = cmd.unit_price_minor;
            product.category = normalize_optional_text(cmd.category.as_deref());
            product.unit = normalize_optional_text(cmd.unit.as_deref());

            products::ActiveModel::from(&product).insert(&db_tx).await?;
            Ok(product)
        })
    }

    /// Return a product by code.
    pub async fn product(&self, product_id: &str) -> ResultEngine<Product> {
        let model = products::Entity::find_by_id(product_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("product not exists".to_string()))?;
        Ok(Product::from(model))
    }

    /// List all products, ordered by code.
    pub async fn list_products(&self) -> ResultEngine<Vec<Product>> {
        let models = products::Entity::find()
            .order_by_asc(products::Column::ProductId)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    /// List products whose balance has fallen below their minimum threshold.
    pub async fn list_low_stock_products(&self) -> ResultEngine<Vec<Product>> {
        let models = products::Entity::find()
            .filter(
                Expr::col(products::Column::QuantityMinor)
                    .lt(Expr::col(products::Column::MinimumThresholdMinor)),
            )
            .order_by_asc(products::Column::ProductId)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    /// Delete a product.
    ///
    /// Refused while any voucher item still references the product, so the
    /// ledger history stays reconstructible.
    pub async fn delete_product(&self, product_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            if products::Entity::find_by_id(product_id)
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Err(EngineError::KeyNotFound("product not exists".to_string()));
            }

            let referenced = voucher_items::Entity::find()
                .filter(voucher_items::Column::ProductId.eq(product_id))
                .count(&db_tx)
                .await?;
            if referenced > 0 {
                return Err(EngineError::Conflict(format!(
                    "product \"{product_id}\" is referenced by {referenced} voucher item(s)"
                )));
            }

            products::Entity::delete_by_id(product_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
