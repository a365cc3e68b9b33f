use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn insert_sql() -> String {
    format!(
        r#"
        INSERT INTO products (name, slug, category, brand, image, price, count_in_stock, description, featured, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, current_timestamp, current_timestamp)
        RETURNING {PRODUCT_COLUMNS}
        "#
    )
}

fn update_sql() -> String {
    format!(
        r#"
        UPDATE products
        SET name = $2,
            slug = $3,
            category = $4,
            brand = $5,
            image = $6,
            price = $7,
            count_in_stock = $8,
            description = $9,
            featured = COALESCE($10, featured),
            updated_at = current_timestamp
        WHERE product_id = $1
        RETURNING {PRODUCT_COLUMNS}
        "#
    )
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let sql = insert_sql();

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(&req.name)
            .bind(&req.slug)
            .bind(&req.category)
            .bind(&req.brand)
            .bind(&req.image)
            .bind(req.price)
            .bind(req.count_in_stock)
            .bind(&req.description)
            .bind(req.featured)
            .fetch_one(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to create product {}: {:?}", req.name, err);
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Created product ID {} ({})",
            product.product_id, product.name
        );
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let sql = update_sql();

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .bind(&req.name)
            .bind(&req.slug)
            .bind(&req.category)
            .bind(&req.brand)
            .bind(&req.image)
            .bind(req.price)
            .bind(req.count_in_stock)
            .bind(&req.description)
            .bind(req.featured)
            .fetch_optional(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to update product ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?
            .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product ID {}", product.product_id);
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        info!("❌ Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
