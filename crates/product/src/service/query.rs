use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::{
        requests::product::{ListProducts, SearchProducts},
        response::product::ProductResponse,
        search::ProductQuery,
    },
    model::product::Product as ProductModel,
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
    domain::responses::{ApiResponse, ApiResponsePagination, Pagination},
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Ok(Self { query, metrics })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-query-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
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
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }

    async fn find_paginated(
        &self,
        operation: &str,
        query: ProductQuery,
        message: &str,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let ProductQuery {
            filter,
            sort,
            window,
        } = query;

        let tracing_ctx = self.start_tracing(
            operation,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", operation.to_string()),
                KeyValue::new("page", window.page),
                KeyValue::new("page_size", window.page_size),
                KeyValue::new("sort", format!("{sort:?}")),
            ],
        );

        let result = tokio::try_join!(
            self.query.find_page(&filter, sort, window),
            self.query.count(&filter),
        );

        let (products, total) = match result {
            Ok(res) => res,
            Err(e) => {
                let msg = format!("Failed to fetch products: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();

        self.complete_tracing(
            &tracing_ctx,
            Method::Get,
            true,
            &format!("Found {} products (total: {total})", data.len()),
        );

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: message.to_string(),
            data,
            pagination: Pagination::new(window.page, window.page_size, total),
        })
    }

    async fn find_one(
        &self,
        operation: &str,
        attribute: KeyValue,
        lookup: impl Future<Output = Result<Option<ProductModel>, RepositoryError>>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            operation,
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", operation.to_string()),
                attribute,
            ],
        );

        match lookup.await {
            Ok(Some(product)) => {
                self.complete_tracing(&tracing_ctx, Method::Get, true, "Product retrieved");
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                self.complete_tracing(&tracing_ctx, Method::Get, false, "Product not found");
                Err(ServiceError::NotFound("Product not found".to_string()))
            }
            Err(e) => {
                let msg = format!("Database error while finding product: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, false, &msg);
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn search_products(
        &self,
        req: &SearchProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!("🔍 Searching products | {:?}", req);

        self.find_paginated(
            "product_search",
            ProductQuery::from(req),
            "Products retrieved successfully",
        )
        .await
    }

    async fn list_products_admin(
        &self,
        req: &ListProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "📋 Listing products for admin | Page: {:?}, Size: {:?}",
            req.page, req.page_size
        );

        self.find_paginated(
            "product_list_admin",
            ProductQuery::from(req),
            "Products listed successfully",
        )
        .await
    }

    async fn list_categories(&self) -> Result<ApiResponse<Vec<String>>, ServiceError> {
        info!("🏷️ Listing product categories");

        let tracing_ctx = self.start_tracing(
            "product_list_categories",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "list_categories"),
            ],
        );

        let mut categories = match self.query.find_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                let msg = format!("Failed to fetch categories: {e:?}");
                self.complete_tracing(&tracing_ctx, Method::Get, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        categories.sort();
        categories.dedup();

        self.complete_tracing(
            &tracing_ctx,
            Method::Get,
            true,
            &format!("Found {} categories", categories.len()),
        );

        Ok(ApiResponse::success(
            "Categories retrieved successfully",
            categories,
        ))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔗 Finding product by slug: {slug}");

        self.find_one(
            "product_find_by_slug",
            KeyValue::new("product.slug", slug.to_string()),
            self.query.find_by_slug(slug),
        )
        .await
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        self.find_one(
            "product_find_by_id",
            KeyValue::new("product.id", i64::from(id)),
            self.query.find_by_id(id),
        )
        .await
    }
}
