use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub brand: String,
    pub image: String,
    pub price: i64,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub featured: bool,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
