mod repository;
mod service;

pub use self::repository::{DynReportRepository, ReportRepositoryTrait};
pub use self::service::{DynReportService, ReportServiceTrait};
