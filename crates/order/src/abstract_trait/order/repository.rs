use crate::{
    domain::requests::order::{CreateOrderRequest, PayOrderRequest},
    model::order::{Order, OrderItem, OrderRecord},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError>;
    /// Orders placed by `user_id`, newest first.
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError>;
    /// Every order, newest first.
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError>;
    /// Lines of all given orders, in insertion order.
    async fn find_items(&self, order_ids: &[i32]) -> Result<Vec<OrderItem>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and all of its lines atomically.
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<OrderRecord, RepositoryError>;
    /// Fails with [`RepositoryError::NotFound`] when `id` does not exist.
    async fn pay_order(&self, id: i32, req: &PayOrderRequest) -> Result<Order, RepositoryError>;
    /// Fails with [`RepositoryError::NotFound`] when `id` does not exist.
    async fn deliver_order(&self, id: i32) -> Result<Order, RepositoryError>;
    /// Fails with [`RepositoryError::NotFound`] when `id` does not exist.
    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError>;
}
