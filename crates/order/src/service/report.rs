use crate::{
    abstract_trait::report::{DynReportRepository, ReportServiceTrait},
    domain::response::report::{
        CategoryCountResponse, DailyOrdersResponse, DashboardSummary, OrderTotalsResponse,
        UserTotalsResponse,
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
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct ReportService {
    pub report: DynReportRepository,
    pub metrics: Metrics,
}

impl ReportService {
    pub fn new(report: DynReportRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();
        metrics.register(registry, "order_report_service");

        Ok(Self { report, metrics })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-report-service")
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
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn get_dashboard_summary(&self) -> Result<ApiResponse<DashboardSummary>, ServiceError> {
        info!("📊 Building dashboard summary");

        let tracing_ctx = self.start_tracing(
            "order_dashboard_summary",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "dashboard_summary"),
            ],
        );

        let result = tokio::try_join!(
            self.report.order_totals(),
            self.report.user_totals(),
            self.report.daily_orders(),
            self.report.product_categories(),
        );

        let (orders, users, daily_orders, product_categories) = match result {
            Ok(groups) => groups,
            Err(e) => {
                let msg = format!("Failed to aggregate dashboard summary: {e:?}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let mut daily_orders: Vec<DailyOrdersResponse> = daily_orders
            .into_iter()
            .map(DailyOrdersResponse::from)
            .collect();
        daily_orders.sort_by(|a, b| a.day.cmp(&b.day));

        let summary = DashboardSummary {
            orders: orders.map(OrderTotalsResponse::from).unwrap_or_default(),
            users: users.map(UserTotalsResponse::from).unwrap_or_default(),
            daily_orders,
            product_categories: product_categories
                .into_iter()
                .map(CategoryCountResponse::from)
                .collect(),
        };

        self.complete_tracing(
            &tracing_ctx,
            true,
            &format!(
                "Dashboard summary built: {} orders over {} days",
                summary.orders.num_orders,
                summary.daily_orders.len()
            ),
        );

        Ok(ApiResponse::success(
            "Dashboard summary retrieved successfully",
            summary,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::report::ReportRepositoryTrait,
        model::report::{CategoryCount, DailyOrders, OrderTotals, UserTotals},
    };
    use shared::errors::RepositoryError;
    use std::sync::Arc;

    /// Stored order as `(day, total_price)`.
    #[derive(Default)]
    struct InMemoryReportRepository {
        orders: Vec<(&'static str, i64)>,
        users: i64,
        categories: Vec<&'static str>,
        fail_daily: bool,
    }

    #[async_trait]
    impl ReportRepositoryTrait for InMemoryReportRepository {
        async fn order_totals(&self) -> Result<Option<OrderTotals>, RepositoryError> {
            // grouped aggregation yields no row at all for an empty collection
            if self.orders.is_empty() {
                return Ok(None);
            }
            Ok(Some(OrderTotals {
                num_orders: self.orders.len() as i64,
                total_sales: self.orders.iter().map(|(_, price)| price).sum(),
            }))
        }

        async fn user_totals(&self) -> Result<Option<UserTotals>, RepositoryError> {
            Ok((self.users > 0).then_some(UserTotals {
                num_users: self.users,
            }))
        }

        async fn daily_orders(&self) -> Result<Vec<DailyOrders>, RepositoryError> {
            if self.fail_daily {
                return Err(RepositoryError::Custom("daily aggregation failed".into()));
            }

            let mut days: Vec<DailyOrders> = Vec::new();
            // reverse insertion order so the service has to sort
            for (day, price) in self.orders.iter().rev() {
                match days.iter_mut().find(|d| d.day == *day) {
                    Some(entry) => {
                        entry.orders += 1;
                        entry.sales += price;
                    }
                    None => days.push(DailyOrders {
                        day: day.to_string(),
                        orders: 1,
                        sales: *price,
                    }),
                }
            }
            Ok(days)
        }

        async fn product_categories(&self) -> Result<Vec<CategoryCount>, RepositoryError> {
            let mut counts: Vec<CategoryCount> = Vec::new();
            for category in &self.categories {
                match counts.iter_mut().find(|c| c.category == *category) {
                    Some(entry) => entry.count += 1,
                    None => counts.push(CategoryCount {
                        category: category.to_string(),
                        count: 1,
                    }),
                }
            }
            Ok(counts)
        }
    }

    fn service(repo: InMemoryReportRepository) -> ReportService {
        ReportService::new(Arc::new(repo), &mut Registry::default()).unwrap()
    }

    #[tokio::test]
    async fn empty_store_still_reports_every_group() {
        let summary = service(InMemoryReportRepository::default())
            .get_dashboard_summary()
            .await
            .unwrap()
            .data;

        assert_eq!(
            summary.orders,
            OrderTotalsResponse {
                num_orders: 0,
                total_sales: 0
            }
        );
        assert_eq!(summary.users.num_users, 0);
        assert!(summary.daily_orders.is_empty());
        assert!(summary.product_categories.is_empty());
    }

    #[tokio::test]
    async fn daily_series_groups_by_day_in_ascending_order() {
        let repo = InMemoryReportRepository {
            orders: vec![("2024-01-01", 100), ("2024-01-01", 50), ("2024-01-02", 20)],
            users: 2,
            ..Default::default()
        };

        let summary = service(repo).get_dashboard_summary().await.unwrap().data;

        assert_eq!(
            summary.daily_orders,
            vec![
                DailyOrdersResponse {
                    day: "2024-01-01".into(),
                    orders: 2,
                    sales: 150
                },
                DailyOrdersResponse {
                    day: "2024-01-02".into(),
                    orders: 1,
                    sales: 20
                },
            ]
        );
        assert_eq!(
            summary.orders,
            OrderTotalsResponse {
                num_orders: 3,
                total_sales: 170
            }
        );
        assert_eq!(summary.users.num_users, 2);
    }

    #[tokio::test]
    async fn days_without_orders_are_not_filled_in() {
        let repo = InMemoryReportRepository {
            orders: vec![("2024-01-05", 10), ("2024-01-01", 30)],
            ..Default::default()
        };

        let summary = service(repo).get_dashboard_summary().await.unwrap().data;

        let days: Vec<&str> = summary.daily_orders.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, vec!["2024-01-01", "2024-01-05"]);
    }

    #[tokio::test]
    async fn products_are_counted_per_category() {
        let repo = InMemoryReportRepository {
            categories: vec!["CPU", "VGA", "CPU", "RAM", "CPU"],
            ..Default::default()
        };

        let summary = service(repo).get_dashboard_summary().await.unwrap().data;

        let cpu = summary
            .product_categories
            .iter()
            .find(|c| c.category == "CPU")
            .map(|c| c.count);
        assert_eq!(cpu, Some(3));
        assert_eq!(summary.product_categories.len(), 3);
        // categories are independent of the (empty) order set
        assert!(summary.daily_orders.is_empty());
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let repo = InMemoryReportRepository {
            fail_daily: true,
            ..Default::default()
        };

        let result = service(repo).get_dashboard_summary().await;

        assert!(matches!(result, Err(ServiceError::Repo(_))));
    }
}
