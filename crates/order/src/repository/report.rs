use crate::{
    abstract_trait::report::ReportRepositoryTrait,
    model::report::{CategoryCount, DailyOrders, OrderTotals, UserTotals},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ReportRepository {
    db: ConnectionPool,
}

impl ReportRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    async fn order_totals(&self) -> Result<Option<OrderTotals>, RepositoryError> {
        info!("🧾 Aggregating order totals");

        sqlx::query_as::<_, OrderTotals>(
            r#"
            SELECT
                COUNT(*) AS num_orders,
                COALESCE(SUM(total_price), 0)::BIGINT AS total_sales
            FROM orders
            "#,
        )
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to aggregate order totals: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn user_totals(&self) -> Result<Option<UserTotals>, RepositoryError> {
        info!("👥 Aggregating user totals");

        sqlx::query_as::<_, UserTotals>("SELECT COUNT(*) AS num_users FROM users")
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to aggregate user totals: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn daily_orders(&self) -> Result<Vec<DailyOrders>, RepositoryError> {
        info!("📅 Aggregating daily orders");

        sqlx::query_as::<_, DailyOrders>(
            r#"
            SELECT
                TO_CHAR(created_at, 'YYYY-MM-DD') AS day,
                COUNT(*) AS orders,
                COALESCE(SUM(total_price), 0)::BIGINT AS sales
            FROM orders
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to aggregate daily orders: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn product_categories(&self) -> Result<Vec<CategoryCount>, RepositoryError> {
        info!("🏷️ Aggregating products per category");

        sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM products
            GROUP BY category
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to aggregate product categories: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
