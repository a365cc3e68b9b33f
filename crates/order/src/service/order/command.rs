use super::not_found;
use crate::{
    abstract_trait::order::{
        DynOrderCommandRepository, DynOrderQueryRepository, OrderCommandServiceTrait,
    },
    domain::{
        requester::Requester,
        requests::order::{CreateOrderRequest, PayOrderRequest},
        response::order::OrderResponse,
    },
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
pub struct OrderCommandService {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub metrics: Metrics,
}

impl OrderCommandService {
    pub fn new(
        command: DynOrderCommandRepository,
        query: DynOrderQueryRepository,
        registry: &mut Registry,
    ) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(registry, "order_command_service");

        Ok(Self {
            command,
            query,
            metrics,
        })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-command-service")
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

    fn complete_tracing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
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

        self.metrics.record(method, status, elapsed);
        tracing_ctx.cx.span().end();
    }

    /// Re-reads the lines of an updated order so the response is complete.
    async fn respond(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        order: Order,
        message: &str,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        match self.query.find_items(&[order.order_id]).await {
            Ok(items) => {
                self.complete_tracing(
                    tracing_ctx,
                    method,
                    true,
                    &format!("Order {} updated", order.order_id),
                );
                Ok(ApiResponse::success(message, OrderResponse::new(order, items)))
            }
            Err(e) => {
                let msg = format!("Failed to fetch order items: {e:?}");
                self.complete_tracing(tracing_ctx, method, false, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        requester: Requester,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🏗️ Creating new order for user_id={}", requester.user_id);

        let tracing_ctx = self.start_tracing(
            "order_create",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", i64::from(requester.user_id)),
                KeyValue::new("order.items", req.order_items.len() as i64),
            ],
        );

        match self.command.create_order(requester.user_id, req).await {
            Ok(record) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Post,
                    true,
                    &format!("Order {} created", record.order.order_id),
                );
                Ok(ApiResponse::success(
                    "New Order created",
                    OrderResponse::from(record),
                ))
            }
            Err(e) => {
                let msg = format!("Failed to create order: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Post, false, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn pay_order(
        &self,
        id: i32,
        requester: Requester,
        req: &PayOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("💳 Paying order {id} for user {}", requester.user_id);

        let tracing_ctx = self.start_tracing(
            "order_pay",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", i64::from(id)),
                KeyValue::new("payment.status", req.status.clone()),
            ],
        );

        let existing = match self.query.find_by_id(id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                self.complete_tracing(&tracing_ctx, Method::Put, false, "Order not found");
                return Err(ServiceError::NotFound("Order not found".to_string()));
            }
            Err(e) => {
                let msg = format!("Database error while finding order: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Put, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        if !requester.can_access(&existing) {
            self.complete_tracing(
                &tracing_ctx,
                Method::Put,
                false,
                "Order belongs to another user",
            );
            return Err(ServiceError::Forbidden(
                "Not allowed to pay this order".to_string(),
            ));
        }

        match self.command.pay_order(id, req).await {
            Ok(order) => {
                self.respond(&tracing_ctx, Method::Put, order, "Order Paid")
                    .await
            }
            Err(e) => {
                let msg = format!("Failed to pay order {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Put, false, &msg);
                Err(not_found(e))
            }
        }
    }

    async fn deliver_order(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🚚 Delivering order {id}");

        let tracing_ctx = self.start_tracing(
            "order_deliver",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", i64::from(id)),
            ],
        );

        match self.command.deliver_order(id).await {
            Ok(order) => {
                self.respond(&tracing_ctx, Method::Put, order, "Order Delivered")
                    .await
            }
            Err(e) => {
                let msg = format!("Failed to deliver order {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Put, false, &msg);
                Err(not_found(e))
            }
        }
    }

    async fn delete_order(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting order {id}");

        let tracing_ctx = self.start_tracing(
            "order_delete",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", i64::from(id)),
            ],
        );

        match self.command.delete_order(id).await {
            Ok(()) => {
                self.complete_tracing(&tracing_ctx, Method::Delete, true, "Order deleted");
                Ok(ApiResponse::success("Order Deleted", ()))
            }
            Err(e) => {
                let msg = format!("Failed to delete order {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Delete, false, &msg);
                Err(not_found(e))
            }
        }
    }
}
