pub mod order;
pub mod report;
