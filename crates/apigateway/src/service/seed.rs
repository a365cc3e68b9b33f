use crate::{
    abstract_trait::{DynSeedRepository, SeedServiceTrait},
    domain::seed::{NewUser, SeedSummary, sample_products, sample_users},
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
    abstract_trait::DynHashing,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct SeedService {
    pub seed: DynSeedRepository,
    pub hashing: DynHashing,
    pub metrics: Metrics,
}

impl SeedService {
    pub fn new(
        seed: DynSeedRepository,
        hashing: DynHashing,
        registry: &mut Registry,
    ) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(registry, "seed_service");

        Ok(Self {
            seed,
            hashing,
            metrics,
        })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("seed-service")
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

        self.metrics.record(Method::Post, status, elapsed);
        tracing_ctx.cx.span().end();
    }

    async fn hash_users(&self) -> Result<Vec<NewUser>, ServiceError> {
        let mut users = Vec::new();

        for sample in sample_users() {
            users.push(NewUser {
                name: sample.name.to_string(),
                email: sample.email.to_string(),
                password_hash: self.hashing.hash_password(sample.password).await?,
                is_admin: sample.is_admin,
            });
        }

        Ok(users)
    }
}

#[async_trait]
impl SeedServiceTrait for SeedService {
    async fn seed(&self) -> Result<ApiResponse<SeedSummary>, ServiceError> {
        info!("🌱 Seeding sample data");

        let tracing_ctx = self.start_tracing(
            "seed_sample_data",
            vec![
                KeyValue::new("component", "seed"),
                KeyValue::new("operation", "seed"),
            ],
        );

        let users = match self.hash_users().await {
            Ok(users) => users,
            Err(e) => {
                self.complete_tracing(&tracing_ctx, false, "Failed to hash sample passwords");
                return Err(e);
            }
        };

        let products = sample_products();

        let summary = match self.seed.replace_all(&products, &users).await {
            Ok(summary) => summary,
            Err(e) => {
                let msg = format!("Failed to seed sample data: {e:?}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        self.complete_tracing(
            &tracing_ctx,
            true,
            &format!(
                "Seeded {} products and {} users",
                summary.created_products, summary.created_users
            ),
        );

        Ok(ApiResponse::success("Sample data seeded successfully", summary))
    }

    async fn seed_if_empty(&self) -> Result<Option<SeedSummary>, ServiceError> {
        if !self.seed.is_empty().await? {
            info!("🌱 Existing data found, startup seed skipped");
            return Ok(None);
        }

        let response = self.seed().await?;
        Ok(Some(response.data))
    }
}
