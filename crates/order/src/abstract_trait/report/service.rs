use crate::domain::response::report::DashboardSummary;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynReportService = Arc<dyn ReportServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReportServiceTrait {
    async fn get_dashboard_summary(&self) -> Result<ApiResponse<DashboardSummary>, ServiceError>;
}
