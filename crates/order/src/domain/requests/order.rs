use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItemRequest {
    /// Catalog product this line was taken from.
    #[validate(range(min = 1))]
    #[serde(alias = "productId")]
    pub product_id: i32,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[validate(range(min = 1, message = "Quantity must be at least one"))]
    pub quantity: i32,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShippingAddressRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    #[serde(alias = "fullName")]
    pub full_name: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "Postal code is required"))]
    #[serde(alias = "postalCode")]
    pub postal_code: String,

    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Cart is empty"), nested)]
    #[serde(alias = "orderItems")]
    pub order_items: Vec<CreateOrderItemRequest>,

    #[validate(nested)]
    #[serde(alias = "shippingAddress")]
    pub shipping_address: ShippingAddressRequest,

    #[validate(length(min = 1, message = "Payment method is required"))]
    #[serde(alias = "paymentMethod")]
    #[schema(example = "PayPal")]
    pub payment_method: String,

    #[validate(range(min = 0))]
    #[serde(alias = "itemsPrice")]
    pub items_price: i64,

    #[validate(range(min = 0))]
    #[serde(alias = "shippingPrice")]
    pub shipping_price: i64,

    #[validate(range(min = 0))]
    #[serde(alias = "taxPrice")]
    pub tax_price: i64,

    #[validate(range(min = 0))]
    #[serde(alias = "totalPrice")]
    pub total_price: i64,
}

/// Payment confirmation as reported by the payment provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PayOrderRequest {
    /// Provider transaction id; the order id is recorded when absent.
    pub id: Option<String>,

    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "COMPLETED")]
    pub status: String,

    pub update_time: Option<String>,

    #[validate(email)]
    pub email_address: Option<String>,
}
