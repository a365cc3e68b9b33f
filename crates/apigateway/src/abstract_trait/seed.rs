use crate::domain::seed::{NewUser, SampleProduct, SeedSummary};
use async_trait::async_trait;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
};
use std::sync::Arc;

pub type DynSeedRepository = Arc<dyn SeedRepositoryTrait + Send + Sync>;
pub type DynSeedService = Arc<dyn SeedServiceTrait + Send + Sync>;

#[async_trait]
pub trait SeedRepositoryTrait {
    /// Removes every product and user, then inserts the given rows atomically.
    async fn replace_all(
        &self,
        products: &[SampleProduct],
        users: &[NewUser],
    ) -> Result<SeedSummary, RepositoryError>;

    /// True when neither users nor products hold any row.
    async fn is_empty(&self) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait SeedServiceTrait {
    async fn seed(&self) -> Result<ApiResponse<SeedSummary>, ServiceError>;
    /// Seeds only a fresh database; `None` means existing data was left alone.
    async fn seed_if_empty(&self) -> Result<Option<SeedSummary>, ServiceError>;
}
