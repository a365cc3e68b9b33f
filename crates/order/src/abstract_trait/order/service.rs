use crate::domain::{
    requester::Requester,
    requests::order::{CreateOrderRequest, PayOrderRequest},
    response::order::OrderResponse,
};
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_by_id(
        &self,
        id: i32,
        requester: Requester,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn find_mine(
        &self,
        requester: Requester,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_all(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        requester: Requester,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn pay_order(
        &self,
        id: i32,
        requester: Requester,
        req: &PayOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn deliver_order(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn delete_order(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
