use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Raw query-string parameters of the public product search.
///
/// Every field is kept as an optional string so that malformed values can be
/// degraded to "no constraint" instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchProducts {
    /// Case-insensitive substring of the product name, or `all`.
    pub query: Option<String>,

    /// Exact category label, or `all`.
    pub category: Option<String>,

    /// Inclusive price range written as `min-max`, or `all`.
    #[param(example = "100-500")]
    pub price: Option<String>,

    /// Minimum rating, or `all`.
    pub rating: Option<String>,

    /// One of `featured`, `lowest`, `highest`, `toprated`, `newest`.
    pub order: Option<String>,

    pub page: Option<String>,

    #[serde(alias = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProducts {
    pub page: Option<String>,

    #[serde(alias = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Intel Core i7")]
    pub name: String,

    #[validate(length(min = 1, message = "Slug is required"))]
    #[schema(example = "intel-core-i7")]
    pub slug: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Image is required"))]
    #[schema(example = "/images/p1.jpg")]
    pub image: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 6990)]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(alias = "countInStock")]
    pub count_in_stock: i32,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub featured: bool,
}

/// Full replacement of the editable product fields; rating and reviews stay untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,

    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(alias = "countInStock")]
    pub count_in_stock: i32,

    #[serde(default)]
    pub description: String,

    /// Left as is when absent.
    pub featured: Option<bool>,
}
