//! Typed form of the catalog search parameters.
//!
//! Loosely-typed request values are turned into independent optional
//! predicates, one sort key and a page window. A value that is absent, empty,
//! the literal `all`, or unparsable leaves its predicate inactive.

use crate::domain::requests::product::{ListProducts, SearchProducts};

pub const SEARCH_PAGE_SIZE: i64 = 3;
pub const ADMIN_PAGE_SIZE: i64 = 10;

const ALL: &str = "all";

fn active(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && *value != ALL)
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Inclusive price bounds parsed from `"<min>-<max>"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Returns `None` when the separator is missing or either bound is not a number.
    pub fn parse(raw: &str) -> Option<Self> {
        let (min, max) = raw.split_once('-')?;

        Some(Self {
            min: parse_finite(min)?,
            max: parse_finite(max)?,
        })
    }

    pub fn contains(&self, price: i64) -> bool {
        let price = price as f64;
        self.min <= price && price <= self.max
    }
}

/// Conjunction of the optional product predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub price: Option<PriceRange>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, raw: Option<&str>) -> Self {
        self.name = active(raw).map(str::to_string);
        self
    }

    pub fn with_category(mut self, raw: Option<&str>) -> Self {
        self.category = active(raw).map(str::to_string);
        self
    }

    pub fn with_min_rating(mut self, raw: Option<&str>) -> Self {
        self.min_rating = active(raw).and_then(parse_finite);
        self
    }

    pub fn with_price(mut self, raw: Option<&str>) -> Self {
        self.price = active(raw).and_then(PriceRange::parse);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.min_rating.is_none()
            && self.price.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Featured,
    Price,
    Rating,
    CreatedAt,
    Id,
}

impl SortField {
    /// Whether the column may hold NULL, which must sort after every value.
    pub fn nullable(&self) -> bool {
        matches!(self, SortField::CreatedAt)
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Featured => "featured",
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::CreatedAt => "created_at",
            SortField::Id => "product_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Featured,
    Lowest,
    Highest,
    TopRated,
    Newest,
    /// Most recently inserted first.
    #[default]
    Default,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("featured") => SortOrder::Featured,
            Some("lowest") => SortOrder::Lowest,
            Some("highest") => SortOrder::Highest,
            Some("toprated") => SortOrder::TopRated,
            Some("newest") => SortOrder::Newest,
            _ => SortOrder::Default,
        }
    }

    pub fn key(&self) -> (SortField, SortDirection) {
        match self {
            SortOrder::Featured => (SortField::Featured, SortDirection::Desc),
            SortOrder::Lowest => (SortField::Price, SortDirection::Asc),
            SortOrder::Highest => (SortField::Price, SortDirection::Desc),
            SortOrder::TopRated => (SortField::Rating, SortDirection::Desc),
            SortOrder::Newest => (SortField::CreatedAt, SortDirection::Desc),
            SortOrder::Default => (SortField::Id, SortDirection::Desc),
        }
    }
}

/// Offset/limit pair derived from a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
}

impl PageWindow {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn parse(page: Option<&str>, page_size: Option<&str>, default_page_size: i64) -> Self {
        let parse_positive = |raw: Option<&str>| {
            raw.and_then(|value| value.trim().parse::<i64>().ok())
                .filter(|value| *value > 0)
        };

        Self::new(
            parse_positive(page).unwrap_or(1),
            parse_positive(page_size).unwrap_or(default_page_size),
        )
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        self.page_size.saturating_mul(self.page - 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: SortOrder,
    pub window: PageWindow,
}

impl From<&SearchProducts> for ProductQuery {
    fn from(req: &SearchProducts) -> Self {
        let filter = ProductFilter::new()
            .with_name(req.query.as_deref())
            .with_category(req.category.as_deref())
            .with_min_rating(req.rating.as_deref())
            .with_price(req.price.as_deref());

        Self {
            filter,
            sort: SortOrder::parse(req.order.as_deref()),
            window: PageWindow::parse(
                req.page.as_deref(),
                req.page_size.as_deref(),
                SEARCH_PAGE_SIZE,
            ),
        }
    }
}

impl From<&ListProducts> for ProductQuery {
    fn from(req: &ListProducts) -> Self {
        Self {
            filter: ProductFilter::new(),
            sort: SortOrder::Default,
            window: PageWindow::parse(
                req.page.as_deref(),
                req.page_size.as_deref(),
                ADMIN_PAGE_SIZE,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_parses_both_bounds() {
        let range = PriceRange::parse("100-500").unwrap();

        assert_eq!(range.min, 100.0);
        assert_eq!(range.max, 500.0);
        assert!(range.contains(100));
        assert!(range.contains(500));
        assert!(!range.contains(99));
        assert!(!range.contains(501));
    }

    #[test]
    fn malformed_price_range_disables_the_filter() {
        for raw in ["abc", "100", "-", "100-", "-500", "a-b", "NaN-10", "1-inf"] {
            let filter = ProductFilter::new().with_price(Some(raw));
            assert_eq!(filter.price, None, "input {raw:?}");
        }
    }

    #[test]
    fn all_sentinel_and_blank_values_are_inactive() {
        let filter = ProductFilter::new()
            .with_name(Some("all"))
            .with_category(Some("  "))
            .with_min_rating(Some("all"))
            .with_price(None);

        assert!(filter.is_empty());
    }

    #[test]
    fn only_lowercase_all_is_the_sentinel() {
        let filter = ProductFilter::new()
            .with_name(Some("ALL"))
            .with_category(Some("All"));

        assert_eq!(filter.name.as_deref(), Some("ALL"));
        assert_eq!(filter.category.as_deref(), Some("All"));
    }

    #[test]
    fn non_numeric_rating_is_ignored() {
        let filter = ProductFilter::new().with_min_rating(Some("four"));
        assert_eq!(filter.min_rating, None);

        let filter = ProductFilter::new().with_min_rating(Some("4.5"));
        assert_eq!(filter.min_rating, Some(4.5));
    }

    #[test]
    fn sort_order_maps_each_key_to_field_and_direction() {
        let cases = [
            ("featured", SortField::Featured, SortDirection::Desc),
            ("lowest", SortField::Price, SortDirection::Asc),
            ("highest", SortField::Price, SortDirection::Desc),
            ("toprated", SortField::Rating, SortDirection::Desc),
            ("newest", SortField::CreatedAt, SortDirection::Desc),
            ("whatever", SortField::Id, SortDirection::Desc),
        ];

        for (raw, field, direction) in cases {
            assert_eq!(SortOrder::parse(Some(raw)).key(), (field, direction), "{raw}");
        }
        assert_eq!(SortOrder::parse(None), SortOrder::Default);
    }

    #[test]
    fn page_window_defaults_and_offsets() {
        let window = PageWindow::parse(None, None, SEARCH_PAGE_SIZE);
        assert_eq!((window.page, window.page_size), (1, 3));
        assert_eq!(window.offset(), 0);

        let window = PageWindow::parse(Some("3"), Some("10"), SEARCH_PAGE_SIZE);
        assert_eq!(window.limit(), 10);
        assert_eq!(window.offset(), 20);
    }

    #[test]
    fn invalid_page_values_fall_back_to_defaults() {
        let window = PageWindow::parse(Some("zero"), Some("-4"), ADMIN_PAGE_SIZE);
        assert_eq!((window.page, window.page_size), (1, 10));

        let window = PageWindow::parse(Some("0"), Some("0"), SEARCH_PAGE_SIZE);
        assert_eq!((window.page, window.page_size), (1, 3));
    }

    #[test]
    fn search_request_builds_a_full_query() {
        let req = SearchProducts {
            query: Some("rtx".into()),
            category: Some("VGA".into()),
            price: Some("100-500".into()),
            rating: Some("4".into()),
            order: Some("lowest".into()),
            page: Some("2".into()),
            page_size: None,
        };

        let query = ProductQuery::from(&req);

        assert_eq!(query.filter.name.as_deref(), Some("rtx"));
        assert_eq!(query.filter.category.as_deref(), Some("VGA"));
        assert_eq!(query.filter.min_rating, Some(4.0));
        assert_eq!(
            query.filter.price,
            Some(PriceRange {
                min: 100.0,
                max: 500.0
            })
        );
        assert_eq!(query.sort, SortOrder::Lowest);
        assert_eq!(query.window, PageWindow::new(2, SEARCH_PAGE_SIZE));
    }

    #[test]
    fn admin_listing_has_no_filters_and_larger_pages() {
        let query = ProductQuery::from(&ListProducts::default());

        assert!(query.filter.is_empty());
        assert_eq!(query.sort, SortOrder::Default);
        assert_eq!(query.window.page_size, ADMIN_PAGE_SIZE);
    }
}
