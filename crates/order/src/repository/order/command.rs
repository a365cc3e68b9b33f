use super::{ORDER_COLUMNS, ORDER_ITEM_COLUMNS};
use crate::{
    abstract_trait::order::OrderCommandRepositoryTrait,
    domain::requests::order::{CreateOrderItemRequest, CreateOrderRequest, PayOrderRequest},
    model::order::{Order, OrderItem, OrderRecord},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn insert_order_sql() -> String {
    format!(
        r#"
        INSERT INTO orders (
            user_id, shipping_full_name, shipping_address, shipping_city, shipping_postal_code,
            shipping_country, payment_method, items_price, shipping_price, tax_price, total_price,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, current_timestamp, current_timestamp)
        RETURNING {ORDER_COLUMNS}
        "#
    )
}

fn insert_items(order_id: i32, items: &[CreateOrderItemRequest]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(
        "INSERT INTO order_items (order_id, product_id, name, slug, image, quantity, price) ",
    );

    builder.push_values(items, |mut row, item| {
        row.push_bind(order_id)
            .push_bind(item.product_id)
            .push_bind(&item.name)
            .push_bind(&item.slug)
            .push_bind(&item.image)
            .push_bind(item.quantity)
            .push_bind(item.price);
    });
    builder.push(format!(" RETURNING {ORDER_ITEM_COLUMNS}"));

    builder
}

fn pay_sql() -> String {
    format!(
        r#"
        UPDATE orders
        SET is_paid = TRUE,
            paid_at = current_timestamp,
            payment_result_id = COALESCE($2, order_id::TEXT),
            payment_result_status = $3,
            payment_result_update_time = $4,
            payment_result_email_address = $5,
            updated_at = current_timestamp
        WHERE order_id = $1
        RETURNING {ORDER_COLUMNS}
        "#
    )
}

fn deliver_sql() -> String {
    format!(
        r#"
        UPDATE orders
        SET is_delivered = TRUE,
            delivered_at = current_timestamp,
            updated_at = current_timestamp
        WHERE order_id = $1
        RETURNING {ORDER_COLUMNS}
        "#
    )
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<OrderRecord, RepositoryError> {
        info!(
            "🏗️ Creating order for user {} with {} items",
            user_id,
            req.order_items.len()
        );

        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to start order transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let address = &req.shipping_address;
        let sql = insert_order_sql();

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(user_id)
            .bind(&address.full_name)
            .bind(&address.address)
            .bind(&address.city)
            .bind(&address.postal_code)
            .bind(&address.country)
            .bind(&req.payment_method)
            .bind(req.items_price)
            .bind(req.shipping_price)
            .bind(req.tax_price)
            .bind(req.total_price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to create order for user {}: {:?}", user_id, e);
                RepositoryError::from(e)
            })?;

        let items = if req.order_items.is_empty() {
            Vec::new()
        } else {
            insert_items(order.order_id, &req.order_items)
                .build_query_as::<OrderItem>()
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    error!(
                        "❌ Failed to insert items of order {}: {:?}",
                        order.order_id, e
                    );
                    RepositoryError::from(e)
                })?
        };

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit order transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created order ID {} for user {}", order.order_id, user_id);
        Ok(OrderRecord { order, items })
    }

    async fn pay_order(&self, id: i32, req: &PayOrderRequest) -> Result<Order, RepositoryError> {
        info!("💳 Marking order {} as paid", id);

        let sql = pay_sql();

        sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .bind(&req.id)
            .bind(&req.status)
            .bind(&req.update_time)
            .bind(&req.email_address)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to pay order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?
            .ok_or(RepositoryError::NotFound)
    }

    async fn deliver_order(&self, id: i32) -> Result<Order, RepositoryError> {
        info!("🚚 Marking order {} as delivered", id);

        let sql = deliver_sql();

        sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to deliver order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        info!("❌ Deleting order: {}", id);

        // order_items go with the order through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i32) -> CreateOrderItemRequest {
        CreateOrderItemRequest {
            product_id,
            name: format!("product {product_id}"),
            slug: format!("product-{product_id}"),
            image: "/images/p.jpg".into(),
            quantity: 1,
            price: 100,
        }
    }

    #[test]
    fn item_insert_binds_every_line_and_returns_rows() {
        let items = vec![line(1), line(2)];
        let builder = insert_items(9, &items);

        let sql = builder.sql();
        assert!(sql.starts_with("INSERT INTO order_items"));
        assert!(sql.contains("($1, $2, $3, $4, $5, $6, $7), ($8, $9, $10, $11, $12, $13, $14)"));
        assert!(sql.ends_with(&format!(" RETURNING {ORDER_ITEM_COLUMNS}")));
    }

    #[test]
    fn payment_falls_back_to_the_order_id() {
        assert!(pay_sql().contains("payment_result_id = COALESCE($2, order_id::TEXT)"));
    }

    #[test]
    fn status_updates_return_the_order_row() {
        for sql in [insert_order_sql(), pay_sql(), deliver_sql()] {
            assert!(sql.contains(&format!("RETURNING {ORDER_COLUMNS}")));
        }
    }
}
