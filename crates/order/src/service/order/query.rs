use super::with_items;
use crate::{
    abstract_trait::order::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::{requester::Requester, response::order::OrderResponse},
    model::order::Order,
};
use anyhow::Result;
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryService {
    pub query: DynOrderQueryRepository,
    pub metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(registry, "order_query_service");

        Ok(Self { query, metrics })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-query-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        TracingContext {
            cx: Context::current_with_span(span),
            start_time,
        }
    }

    fn complete_tracing(&self, tracing_ctx: &TracingContext, is_success: bool, message: &str) {
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", if is_success { "SUCCESS" } else { "ERROR" }),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ {message}");
        } else {
            error!("❌ {message}");
        }

        self.metrics.record(Method::Get, status, elapsed);
        tracing_ctx.cx.span().end();
    }

    async fn load_items(
        &self,
        tracing_ctx: &TracingContext,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        let ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();

        match self.query.find_items(&ids).await {
            Ok(items) => Ok(with_items(orders, items)),
            Err(e) => {
                let msg = format!("Failed to fetch order items: {e:?}");
                self.complete_tracing(tracing_ctx, false, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_id(
        &self,
        id: i32,
        requester: Requester,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🆔 Finding order {id} for user {}", requester.user_id);

        let tracing_ctx = self.start_tracing(
            "order_find_by_id",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", i64::from(id)),
            ],
        );

        let order = match self.query.find_by_id(id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                self.complete_tracing(&tracing_ctx, false, "Order not found");
                return Err(ServiceError::NotFound("Order not found".to_string()));
            }
            Err(e) => {
                let msg = format!("Database error while finding order: {e:?}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        if !requester.can_access(&order) {
            self.complete_tracing(&tracing_ctx, false, "Order belongs to another user");
            return Err(ServiceError::Forbidden(
                "Not allowed to view this order".to_string(),
            ));
        }

        let mut orders = self.load_items(&tracing_ctx, vec![order]).await?;
        let Some(order) = orders.pop() else {
            return Err(ServiceError::NotFound("Order not found".to_string()));
        };

        self.complete_tracing(&tracing_ctx, true, "Order retrieved");
        Ok(ApiResponse::success("Order retrieved successfully", order))
    }

    async fn find_mine(
        &self,
        requester: Requester,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("👤 Listing orders of user {}", requester.user_id);

        let tracing_ctx = self.start_tracing(
            "order_find_mine",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", i64::from(requester.user_id)),
            ],
        );

        let orders = match self.query.find_by_user(requester.user_id).await {
            Ok(orders) => orders,
            Err(e) => {
                let msg = format!("Failed to fetch user orders: {e:?}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let orders = self.load_items(&tracing_ctx, orders).await?;

        self.complete_tracing(
            &tracing_ctx,
            true,
            &format!("Found {} orders", orders.len()),
        );
        Ok(ApiResponse::success("Orders retrieved successfully", orders))
    }

    async fn find_all(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("📋 Listing all orders");

        let tracing_ctx = self.start_tracing(
            "order_find_all",
            vec![KeyValue::new("component", "order")],
        );

        let orders = match self.query.find_all().await {
            Ok(orders) => orders,
            Err(e) => {
                let msg = format!("Failed to fetch orders: {e:?}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let orders = self.load_items(&tracing_ctx, orders).await?;

        self.complete_tracing(
            &tracing_ctx,
            true,
            &format!("Found {} orders", orders.len()),
        );
        Ok(ApiResponse::success("Orders retrieved successfully", orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryOrderStore, placed_order};
    use std::sync::Arc;

    fn service(store: Arc<InMemoryOrderStore>) -> OrderQueryService {
        OrderQueryService::new(store, &mut Registry::default()).unwrap()
    }

    fn store() -> Arc<InMemoryOrderStore> {
        let store = InMemoryOrderStore::default();
        store.insert(placed_order(1, 10, 2));
        store.insert(placed_order(2, 20, 1));
        store.insert(placed_order(3, 10, 3));
        Arc::new(store)
    }

    #[tokio::test]
    async fn owner_sees_order_with_its_lines() {
        let order = service(store())
            .find_by_id(3, Requester::new(10, false))
            .await
            .unwrap()
            .data;

        assert_eq!(order.id, 3);
        assert_eq!(order.order_items.len(), 3);
        assert!(order.order_items.iter().all(|i| i.id / 100 == 3));
        assert!(order.payment_result.is_none());
    }

    #[tokio::test]
    async fn other_users_order_is_forbidden() {
        let result = service(store())
            .find_by_id(2, Requester::new(10, false))
            .await;

        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn admin_sees_any_order() {
        let order = service(store())
            .find_by_id(2, Requester::new(99, true))
            .await
            .unwrap()
            .data;

        assert_eq!(order.user_id, 20);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let result = service(store())
            .find_by_id(404, Requester::new(10, true))
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(msg)) if msg == "Order not found"));
    }

    #[tokio::test]
    async fn mine_lists_only_own_orders_newest_first() {
        let orders = service(store())
            .find_mine(Requester::new(10, false))
            .await
            .unwrap()
            .data;

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(orders[1].order_items.len(), 2);
    }

    #[tokio::test]
    async fn user_without_orders_gets_an_empty_list() {
        let orders = service(store())
            .find_mine(Requester::new(77, false))
            .await
            .unwrap()
            .data;

        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn admin_listing_covers_every_user() {
        let orders = service(store()).find_all().await.unwrap().data;

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].id, 3);
    }
}
