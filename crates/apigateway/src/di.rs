use anyhow::{Context, Result};
use order::{
    abstract_trait::{
        order::{
            DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
            DynOrderQueryService,
        },
        report::{DynReportRepository, DynReportService},
    },
    repository::{OrderCommandRepository, OrderQueryRepository, ReportRepository},
    service::{OrderCommandService, OrderQueryService, ReportService},
};
use product::{
    abstract_trait::product::{
        repository::{DynProductCommandRepository, DynProductQueryRepository},
        service::{DynProductCommandService, DynProductQueryService},
    },
    repository::{ProductCommandRepository, ProductQueryRepository},
    service::{ProductCommandService, ProductQueryService},
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    config::{ConnectionPool, Hashing},
};
use std::sync::Arc;

use crate::{
    abstract_trait::{DynSeedRepository, DynSeedService},
    repository::SeedRepository,
    service::SeedService,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
    pub report: DynReportService,
    pub seed: DynSeedService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"DynProductQueryService")
            .field("product_command", &"DynProductCommandService")
            .field("order_query", &"DynOrderQueryService")
            .field("order_command", &"DynOrderCommandService")
            .field("report", &"DynReportService")
            .field("seed", &"DynSeedService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, registry: &mut Registry) -> Result<Self> {
        let product_repo: DynProductQueryRepository =
            Arc::new(ProductQueryRepository::new(pool.clone()));
        let product_query: DynProductQueryService = Arc::new(
            ProductQueryService::new(product_repo, registry)
                .context("Failed to initialize product query service")?,
        );

        let product_command_repo: DynProductCommandRepository =
            Arc::new(ProductCommandRepository::new(pool.clone()));
        let product_command: DynProductCommandService = Arc::new(
            ProductCommandService::new(product_command_repo, registry)
                .context("Failed to initialize product command service")?,
        );

        let order_query_repo: DynOrderQueryRepository =
            Arc::new(OrderQueryRepository::new(pool.clone()));
        let order_command_repo: DynOrderCommandRepository =
            Arc::new(OrderCommandRepository::new(pool.clone()));
        let order_query: DynOrderQueryService = Arc::new(
            OrderQueryService::new(order_query_repo.clone(), registry)
                .context("Failed to initialize order query service")?,
        );
        let order_command: DynOrderCommandService = Arc::new(
            OrderCommandService::new(order_command_repo, order_query_repo, registry)
                .context("Failed to initialize order command service")?,
        );

        let report_repo: DynReportRepository = Arc::new(ReportRepository::new(pool.clone()));
        let report: DynReportService = Arc::new(
            ReportService::new(report_repo, registry)
                .context("Failed to initialize report service")?,
        );

        let hashing: DynHashing = Arc::new(Hashing::new());
        let seed_repo: DynSeedRepository = Arc::new(SeedRepository::new(pool));
        let seed: DynSeedService = Arc::new(
            SeedService::new(seed_repo, hashing, registry)
                .context("Failed to initialize seed service")?,
        );

        Ok(Self {
            product_query,
            product_command,
            order_query,
            order_command,
            report,
            seed,
        })
    }
}
