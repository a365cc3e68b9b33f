use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynJwtService,
    config::{ConnectionPool, JwtConfig},
    utils::ProcessMetrics,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub process_metrics: Arc<ProcessMetrics>,
}

impl AppState {
    pub async fn new(pool: ConnectionPool, jwt_secret: &str) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService;
        let mut registry = Registry::default();

        let di_container = DependenciesInject::new(pool, &mut registry)
            .context("Failed to initialized depencency injection container")?;

        let state = Self::from_parts(di_container, jwt_config, registry);

        tokio::spawn(
            state
                .process_metrics
                .clone()
                .watch(Duration::from_secs(15)),
        );

        Ok(state)
    }

    /// Assembles a state around an already wired container, without spawning collectors.
    pub fn from_parts(
        di_container: DependenciesInject,
        jwt_config: DynJwtService,
        mut registry: Registry,
    ) -> Self {
        let process_metrics = Arc::new(ProcessMetrics::new());
        process_metrics.register(&mut registry);

        Self {
            jwt_config,
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            process_metrics,
        }
    }
}
