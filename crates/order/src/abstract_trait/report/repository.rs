use crate::model::report::{CategoryCount, DailyOrders, OrderTotals, UserTotals};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynReportRepository = Arc<dyn ReportRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ReportRepositoryTrait {
    /// `None` when the store yields no aggregate row for an empty order set.
    async fn order_totals(&self) -> Result<Option<OrderTotals>, RepositoryError>;
    async fn user_totals(&self) -> Result<Option<UserTotals>, RepositoryError>;
    async fn daily_orders(&self) -> Result<Vec<DailyOrders>, RepositoryError>;
    async fn product_categories(&self) -> Result<Vec<CategoryCount>, RepositoryError>;
}
