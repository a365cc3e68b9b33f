use crate::model::report::{CategoryCount, DailyOrders, OrderTotals, UserTotals};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderTotalsResponse {
    pub num_orders: i64,
    pub total_sales: i64,
}

impl From<OrderTotals> for OrderTotalsResponse {
    fn from(value: OrderTotals) -> Self {
        Self {
            num_orders: value.num_orders,
            total_sales: value.total_sales,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserTotalsResponse {
    pub num_users: i64,
}

impl From<UserTotals> for UserTotalsResponse {
    fn from(value: UserTotals) -> Self {
        Self {
            num_users: value.num_users,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyOrdersResponse {
    #[schema(example = "2024-01-01")]
    pub day: String,
    pub orders: i64,
    pub sales: i64,
}

impl From<DailyOrders> for DailyOrdersResponse {
    fn from(value: DailyOrders) -> Self {
        Self {
            day: value.day,
            orders: value.orders,
            sales: value.sales,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountResponse {
    pub category: String,
    pub count: i64,
}

impl From<CategoryCount> for CategoryCountResponse {
    fn from(value: CategoryCount) -> Self {
        Self {
            category: value.category,
            count: value.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub orders: OrderTotalsResponse,
    pub users: UserTotalsResponse,
    pub daily_orders: Vec<DailyOrdersResponse>,
    pub product_categories: Vec<CategoryCountResponse>,
}
