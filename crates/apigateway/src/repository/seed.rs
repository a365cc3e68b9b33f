use crate::{
    abstract_trait::SeedRepositoryTrait,
    domain::seed::{NewUser, SampleProduct, SeedSummary},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

#[derive(Clone)]
pub struct SeedRepository {
    db: ConnectionPool,
}

impl SeedRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn insert_products(products: &[SampleProduct]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "INSERT INTO products (name, slug, category, brand, image, price, count_in_stock, rating, num_reviews, description) ",
    );

    builder.push_values(products, |mut row, product| {
        row.push_bind(product.name)
            .push_bind(product.slug)
            .push_bind(product.category)
            .push_bind(product.brand)
            .push_bind(product.image)
            .push_bind(product.price)
            .push_bind(product.count_in_stock)
            .push_bind(product.rating)
            .push_bind(product.num_reviews)
            .push_bind(product.description);
    });

    builder
}

fn insert_users(users: &[NewUser]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("INSERT INTO users (name, email, password, is_admin) ");

    builder.push_values(users, |mut row, user| {
        row.push_bind(user.name.clone())
            .push_bind(user.email.clone())
            .push_bind(user.password_hash.clone())
            .push_bind(user.is_admin);
    });

    builder
}

#[async_trait]
impl SeedRepositoryTrait for SeedRepository {
    async fn replace_all(
        &self,
        products: &[SampleProduct],
        users: &[NewUser],
    ) -> Result<SeedSummary, RepositoryError> {
        info!(
            "🌱 Replacing catalog with {} products and {} users",
            products.len(),
            users.len()
        );

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to start seed transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        // orders reference users and products, so they go too
        sqlx::query("TRUNCATE TABLE order_items, orders, products, users RESTART IDENTITY CASCADE")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to clear existing rows: {:?}", e);
                RepositoryError::from(e)
            })?;

        let mut summary = SeedSummary::default();

        if !products.is_empty() {
            summary.created_products = insert_products(products)
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("❌ Failed to insert sample products: {:?}", e);
                    RepositoryError::from(e)
                })?
                .rows_affected();
        }

        if !users.is_empty() {
            summary.created_users = insert_users(users)
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("❌ Failed to insert sample users: {:?}", e);
                    RepositoryError::from(e)
                })?
                .rows_affected();
        }

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit seed transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(summary)
    }

    async fn is_empty(&self) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT NOT EXISTS (SELECT 1 FROM users) AND NOT EXISTS (SELECT 1 FROM products)",
        )
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to inspect existing rows: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
