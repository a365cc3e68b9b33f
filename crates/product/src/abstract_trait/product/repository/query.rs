use crate::{
    domain::search::{PageWindow, ProductFilter, SortOrder},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// One page of products matching `filter`, ordered by `sort`.
    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: SortOrder,
        window: PageWindow,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
    /// Number of products matching `filter`, ignoring any page window.
    async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError>;
    async fn find_categories(&self) -> Result<Vec<String>, RepositoryError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
}
