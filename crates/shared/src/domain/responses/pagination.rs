use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// `total_pages` is `ceil(total_items / page_size)`, so an empty result has zero pages.
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let total_pages = if page_size > 0 && total_items > 0 {
            (total_items - 1) / page_size + 1
        } else {
            0
        };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 3, 7).total_pages, 3);
        assert_eq!(Pagination::new(1, 3, 6).total_pages, 2);
        assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        assert_eq!(Pagination::new(1, 3, 0).total_pages, 0);
    }

    #[test]
    fn huge_page_size_does_not_overflow() {
        assert_eq!(Pagination::new(1, i64::MAX, 7).total_pages, 1);
        assert_eq!(Pagination::new(i64::MAX, i64::MAX, i64::MAX).total_pages, 1);
        assert_eq!(Pagination::new(1, 1, i64::MAX).total_pages, i64::MAX);
    }
}
