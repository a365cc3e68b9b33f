mod command;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::query::ProductQueryRepository;

const PRODUCT_COLUMNS: &str = "product_id, name, slug, category, brand, image, price, \
    count_in_stock, rating, num_reviews, featured, description, created_at, updated_at";
