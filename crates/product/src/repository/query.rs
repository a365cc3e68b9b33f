use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    domain::search::{PageWindow, ProductFilter, SortOrder},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    if *has_where {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_where = true;
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    let mut has_where = false;

    if let Some(name) = &filter.name {
        push_condition(builder, &mut has_where);
        builder
            .push("name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }

    if let Some(category) = &filter.category {
        push_condition(builder, &mut has_where);
        builder.push("category = ").push_bind(category.clone());
    }

    if let Some(min_rating) = filter.min_rating {
        push_condition(builder, &mut has_where);
        builder.push("rating >= ").push_bind(min_rating);
    }

    if let Some(range) = filter.price {
        push_condition(builder, &mut has_where);
        builder
            .push("price >= ")
            .push_bind(range.min)
            .push(" AND price <= ")
            .push_bind(range.max);
    }
}

fn page_query(
    filter: &ProductFilter,
    sort: SortOrder,
    window: PageWindow,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
    push_filter(&mut builder, filter);

    let (field, direction) = sort.key();
    builder.push(format!(" ORDER BY {} {}", field.column(), direction.keyword()));
    if field.nullable() {
        builder.push(" NULLS LAST");
    }

    builder
        .push(" LIMIT ")
        .push_bind(window.limit())
        .push(" OFFSET ")
        .push_bind(window.offset());

    builder
}

fn count_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filter(&mut builder, filter);
    builder
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: SortOrder,
        window: PageWindow,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching product page {window:?} sorted by {sort:?} with filter {filter:?}");

        let mut builder = page_query(filter, sort, window);

        let products = builder
            .build_query_as::<ProductModel>()
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(products)
    }

    async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        let mut builder = count_query(filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(total)
    }

    async fn find_categories(&self) -> Result<Vec<String>, RepositoryError> {
        info!("🏷️ Fetching distinct product categories");

        let categories = sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM products")
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch categories: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(categories)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🔗 Fetching product by slug: {}", slug);

        let product = sqlx::query_as::<_, ProductModel>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)?;

        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let product = sqlx::query_as::<_, ProductModel>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)?;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::{PriceRange, SEARCH_PAGE_SIZE};

    #[test]
    fn unfiltered_page_query_only_orders_and_limits() {
        let builder = page_query(
            &ProductFilter::new(),
            SortOrder::Default,
            PageWindow::new(1, SEARCH_PAGE_SIZE),
        );

        assert_eq!(
            builder.sql(),
            format!(
                "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_id DESC LIMIT $1 OFFSET $2"
            )
        );
    }

    #[test]
    fn every_active_predicate_adds_one_clause() {
        let filter = ProductFilter {
            name: Some("rtx".into()),
            category: Some("VGA".into()),
            min_rating: Some(4.0),
            price: Some(PriceRange {
                min: 100.0,
                max: 500.0,
            }),
        };

        let builder = page_query(&filter, SortOrder::Lowest, PageWindow::new(2, 3));

        assert!(builder.sql().ends_with(
            " FROM products WHERE name ILIKE $1 AND category = $2 AND rating >= $3 \
             AND price >= $4 AND price <= $5 ORDER BY price ASC LIMIT $6 OFFSET $7"
        ));
    }

    #[test]
    fn newest_puts_undated_products_last() {
        let builder = page_query(
            &ProductFilter::new(),
            SortOrder::Newest,
            PageWindow::new(1, SEARCH_PAGE_SIZE),
        );

        assert!(
            builder
                .sql()
                .ends_with(" ORDER BY created_at DESC NULLS LAST LIMIT $1 OFFSET $2")
        );
    }

    #[test]
    fn count_query_shares_the_filter_but_not_the_window() {
        let filter = ProductFilter::new().with_category(Some("CPU"));

        let builder = count_query(&filter);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM products WHERE category = $1"
        );
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
