use crate::model::product::Product as ProductModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: i32,
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
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            slug: value.slug,
            category: value.category,
            brand: value.brand,
            image: value.image,
            price: value.price,
            count_in_stock: value.count_in_stock,
            rating: value.rating,
            num_reviews: value.num_reviews,
            featured: value.featured,
            description: value.description,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
