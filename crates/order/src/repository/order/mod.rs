mod command;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;

const ORDER_COLUMNS: &str = "order_id, user_id, shipping_full_name, shipping_address, \
    shipping_city, shipping_postal_code, shipping_country, payment_method, payment_result_id, \
    payment_result_status, payment_result_update_time, payment_result_email_address, \
    items_price, shipping_price, tax_price, total_price, is_paid, paid_at, is_delivered, \
    delivered_at, created_at, updated_at";

const ORDER_ITEM_COLUMNS: &str =
    "order_item_id, order_id, product_id, name, slug, image, quantity, price";
