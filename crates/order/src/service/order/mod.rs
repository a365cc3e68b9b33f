mod command;
mod query;

pub use self::command::OrderCommandService;
pub use self::query::OrderQueryService;

use crate::{
    domain::response::order::OrderResponse,
    model::order::{Order, OrderItem},
};
use shared::errors::{RepositoryError, ServiceError};

fn not_found(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound("Order not found".to_string()),
        other => ServiceError::Repo(other),
    }
}

/// Attaches each order's lines, keeping the order of `orders`.
fn with_items(orders: Vec<Order>, mut items: Vec<OrderItem>) -> Vec<OrderResponse> {
    orders
        .into_iter()
        .map(|order| {
            let (own, rest): (Vec<_>, Vec<_>) = items
                .drain(..)
                .partition(|item| item.order_id == order.order_id);
            items = rest;
            OrderResponse::new(order, own)
        })
        .collect()
}
