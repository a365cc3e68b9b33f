use crate::model::order::{Order, OrderItem, OrderRecord};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub quantity: i32,
    pub price: i64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        Self {
            id: value.order_item_id,
            product_id: value.product_id,
            name: value.name,
            slug: value.slug,
            image: value.image,
            quantity: value.quantity,
            price: value.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShippingAddressResponse {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentResultResponse {
    pub id: Option<String>,
    pub status: Option<String>,
    pub update_time: Option<String>,
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub order_items: Vec<OrderItemResponse>,
    pub shipping_address: ShippingAddressResponse,
    pub payment_method: String,
    /// Present once the order has been paid.
    pub payment_result: Option<PaymentResultResponse>,
    pub items_price: i64,
    pub shipping_price: i64,
    pub tax_price: i64,
    pub total_price: i64,
    pub is_paid: bool,
    pub paid_at: Option<String>,
    pub is_delivered: bool,
    pub delivered_at: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl OrderResponse {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        let payment_result = order.is_paid.then(|| PaymentResultResponse {
            id: order.payment_result_id,
            status: order.payment_result_status,
            update_time: order.payment_result_update_time,
            email_address: order.payment_result_email_address,
        });

        Self {
            id: order.order_id,
            user_id: order.user_id,
            order_items: items.into_iter().map(OrderItemResponse::from).collect(),
            shipping_address: ShippingAddressResponse {
                full_name: order.shipping_full_name,
                address: order.shipping_address,
                city: order.shipping_city,
                postal_code: order.shipping_postal_code,
                country: order.shipping_country,
            },
            payment_method: order.payment_method,
            payment_result,
            items_price: order.items_price,
            shipping_price: order.shipping_price,
            tax_price: order.tax_price,
            total_price: order.total_price,
            is_paid: order.is_paid,
            paid_at: order.paid_at.map(|dt| dt.to_string()),
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at.map(|dt| dt.to_string()),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.map(|dt| dt.to_string()),
        }
    }
}

impl From<OrderRecord> for OrderResponse {
    fn from(value: OrderRecord) -> Self {
        Self::new(value.order, value.items)
    }
}
