use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderTotals {
    pub num_orders: i64,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserTotals {
    pub num_users: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyOrders {
    /// Calendar day of `created_at`, formatted `YYYY-MM-DD`.
    pub day: String,
    pub orders: i64,
    pub sales: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
