use crate::{
    abstract_trait::order::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    domain::requests::order::{CreateOrderRequest, PayOrderRequest},
    model::order::{Order, OrderItem, OrderRecord},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use shared::errors::RepositoryError;
use std::sync::Mutex;

fn at_day(day: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1 + (day % 28) as u32)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}

/// Unpaid order `id` of `user_id` with `lines` items numbered `id * 100 + n`.
pub fn placed_order(id: i32, user_id: i32, lines: i32) -> OrderRecord {
    let order = Order {
        order_id: id,
        user_id,
        shipping_full_name: "John".into(),
        shipping_address: "Jl. Merdeka 1".into(),
        shipping_city: "Jakarta".into(),
        shipping_postal_code: "10110".into(),
        shipping_country: "Indonesia".into(),
        payment_method: "PayPal".into(),
        payment_result_id: None,
        payment_result_status: None,
        payment_result_update_time: None,
        payment_result_email_address: None,
        items_price: 100 * i64::from(lines),
        shipping_price: 0,
        tax_price: 0,
        total_price: 100 * i64::from(lines),
        is_paid: false,
        paid_at: None,
        is_delivered: false,
        delivered_at: None,
        created_at: at_day(id),
        updated_at: None,
    };

    let items = (1..=lines)
        .map(|n| OrderItem {
            order_item_id: id * 100 + n,
            order_id: id,
            product_id: Some(n),
            name: format!("product {n}"),
            slug: format!("product-{n}"),
            image: format!("/images/{n}.jpg"),
            quantity: 1,
            price: 100,
        })
        .collect();

    OrderRecord { order, items }
}

#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<Vec<Order>>,
    items: Mutex<Vec<OrderItem>>,
}

impl InMemoryOrderStore {
    pub fn insert(&self, record: OrderRecord) {
        self.orders.lock().unwrap().push(record.order);
        self.items.lock().unwrap().extend(record.items);
    }

    pub fn order(&self, id: i32) -> Option<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_id == id)
            .cloned()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn item_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.order_id.cmp(&a.order_id))
        });
        orders
    }

    fn update(
        &self,
        id: i32,
        change: impl FnOnce(&mut Order),
    ) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == id)
            .ok_or(RepositoryError::NotFound)?;
        change(order);
        Ok(order.clone())
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryOrderStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.order(id))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        let orders = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        Ok(Self::newest_first(orders))
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(Self::newest_first(self.orders.lock().unwrap().clone()))
    }

    async fn find_items(&self, order_ids: &[i32]) -> Result<Vec<OrderItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| order_ids.contains(&i.order_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryOrderStore {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<OrderRecord, RepositoryError> {
        let id = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.order_id)
            .max()
            .unwrap_or(0)
            + 1;

        let mut record = placed_order(id, user_id, 0);
        let address = &req.shipping_address;
        record.order.shipping_full_name = address.full_name.clone();
        record.order.shipping_address = address.address.clone();
        record.order.shipping_city = address.city.clone();
        record.order.shipping_postal_code = address.postal_code.clone();
        record.order.shipping_country = address.country.clone();
        record.order.payment_method = req.payment_method.clone();
        record.order.items_price = req.items_price;
        record.order.shipping_price = req.shipping_price;
        record.order.tax_price = req.tax_price;
        record.order.total_price = req.total_price;
        record.items = req
            .order_items
            .iter()
            .zip(1..)
            .map(|(item, n)| OrderItem {
                order_item_id: id * 100 + n,
                order_id: id,
                product_id: Some(item.product_id),
                name: item.name.clone(),
                slug: item.slug.clone(),
                image: item.image.clone(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        self.insert(record.clone());
        Ok(record)
    }

    async fn pay_order(&self, id: i32, req: &PayOrderRequest) -> Result<Order, RepositoryError> {
        self.update(id, |order| {
            order.is_paid = true;
            order.paid_at = Some(at_day(id + 1));
            order.payment_result_id = Some(req.id.clone().unwrap_or_else(|| id.to_string()));
            order.payment_result_status = Some(req.status.clone());
            order.payment_result_update_time = req.update_time.clone();
            order.payment_result_email_address = req.email_address.clone();
        })
    }

    async fn deliver_order(&self, id: i32) -> Result<Order, RepositoryError> {
        self.update(id, |order| {
            order.is_delivered = true;
            order.delivered_at = Some(at_day(id + 2));
        })
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| o.order_id != id);

        if orders.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.items.lock().unwrap().retain(|i| i.order_id != id);
        Ok(())
    }
}
