mod order;
mod report;

pub use self::order::{OrderCommandService, OrderQueryService};
pub use self::report::ReportService;
