mod order;
mod report;

pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::report::ReportRepository;
