use crate::{
    abstract_trait::product::{
        repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
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
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

fn not_found(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound("Product not found".to_string()),
        other => ServiceError::Repo(other),
    }
}

#[derive(Clone)]
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Ok(Self { command, metrics })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-command-service")
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
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

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
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating product: {}", req.name);

        let tracing_ctx = self.start_tracing(
            "product_create",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.slug", req.slug.clone()),
            ],
        );

        match self.command.create_product(req).await {
            Ok(product) => {
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Post,
                    true,
                    &format!("Product {} created", product.product_id),
                );
                Ok(ApiResponse::success(
                    "Product created successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(e) => {
                let msg = format!("Failed to create product: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Post, false, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product ID: {id}");

        let tracing_ctx = self.start_tracing(
            "product_update",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", i64::from(id)),
            ],
        );

        match self.command.update_product(id, req).await {
            Ok(product) => {
                self.complete_tracing(&tracing_ctx, Method::Put, true, "Product updated");
                Ok(ApiResponse::success(
                    "Product updated successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(e) => {
                let msg = format!("Failed to update product {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Put, false, &msg);
                Err(not_found(e))
            }
        }
    }

    async fn delete_product(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting product ID: {id}");

        let tracing_ctx = self.start_tracing(
            "product_delete",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", i64::from(id)),
            ],
        );

        match self.command.delete_product(id).await {
            Ok(()) => {
                self.complete_tracing(&tracing_ctx, Method::Delete, true, "Product deleted");
                Ok(ApiResponse::success("Product deleted successfully", ()))
            }
            Err(e) => {
                let msg = format!("Failed to delete product {id}: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Delete, false, &msg);
                Err(not_found(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryProductStore, catalog};
    use std::sync::Arc;

    fn create_request(name: &str) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            category: "SSD".into(),
            brand: "Samsung".into(),
            image: "/images/ssd.jpg".into(),
            price: 1500,
            count_in_stock: 3,
            description: "NVMe drive".into(),
            featured: false,
        }
    }

    fn update_request() -> UpdateProductRequest {
        UpdateProductRequest {
            name: "Intel Core i7 14700K".into(),
            slug: "intel-core-i7-14700k".into(),
            category: "CPU".into(),
            brand: "Intel".into(),
            image: "/images/1.jpg".into(),
            price: 7990,
            count_in_stock: 0,
            description: "Refresh".into(),
            featured: None,
        }
    }

    fn service(store: Arc<InMemoryProductStore>) -> ProductCommandService {
        ProductCommandService::new(store, &mut Registry::default()).unwrap()
    }

    #[tokio::test]
    async fn created_product_gets_the_next_id_and_empty_rating() {
        let store = Arc::new(InMemoryProductStore::new(catalog()));

        let created = service(store.clone())
            .create_product(&create_request("Samsung 990 Pro"))
            .await
            .unwrap()
            .data;

        assert_eq!(created.id, 8);
        assert_eq!(created.slug, "samsung-990-pro");
        assert_eq!(created.rating, 0.0);
        assert_eq!(created.num_reviews, 0);
        assert_eq!(store.len(), 8);
    }

    #[tokio::test]
    async fn update_replaces_editable_fields_and_keeps_rating() {
        let store = Arc::new(InMemoryProductStore::new(catalog()));

        let updated = service(store.clone())
            .update_product(1, &update_request())
            .await
            .unwrap()
            .data;

        assert_eq!(updated.name, "Intel Core i7 14700K");
        assert_eq!(updated.price, 7990);
        assert_eq!(updated.count_in_stock, 0);
        assert_eq!(updated.rating, 4.0);
        assert!(!updated.featured);
    }

    #[tokio::test]
    async fn update_of_unknown_product_is_not_found() {
        let store = Arc::new(InMemoryProductStore::new(catalog()));

        let result = service(store).update_product(99, &update_request()).await;

        assert!(matches!(result, Err(ServiceError::NotFound(msg)) if msg == "Product not found"));
    }

    #[tokio::test]
    async fn delete_removes_the_product_once() {
        let store = Arc::new(InMemoryProductStore::new(catalog()));
        let service = service(store.clone());

        service.delete_product(3).await.unwrap();
        assert_eq!(store.len(), 6);

        let again = service.delete_product(3).await;
        assert!(matches!(again, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn failed_writes_are_counted_as_errors() {
        let store = Arc::new(InMemoryProductStore::new(catalog()));
        let service = service(store);

        let _ = service.delete_product(42).await;

        assert_eq!(service.metrics.count(Method::Delete, StatusUtils::Error), 1);
        assert_eq!(service.metrics.count(Method::Delete, StatusUtils::Success), 0);
    }
}
