use crate::{
    abstract_trait::product::repository::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        search::{PageWindow, ProductFilter, SortDirection, SortField, SortOrder},
    },
    model::product::Product,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use shared::errors::RepositoryError;
use std::{cmp::Ordering, sync::Mutex};

pub fn product(id: i32, name: &str, category: &str, price: i64, rating: f64) -> Product {
    Product {
        product_id: id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        category: category.to_string(),
        brand: "brand".to_string(),
        image: format!("/images/{id}.jpg"),
        price,
        count_in_stock: 10,
        rating,
        num_reviews: 1,
        featured: id % 2 == 0,
        description: String::new(),
        created_at: Some(created_at(id)),
        updated_at: None,
    }
}

fn created_at(id: i32) -> NaiveDateTime {
    // newer ids are not always created later
    let day = 1 + (id * 7 % 28) as u32;
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}

/// Seven products: three `CPU`, two `VGA`, two `RAM`.
pub fn catalog() -> Vec<Product> {
    vec![
        product(1, "Intel Core i7", "CPU", 6990, 4.0),
        product(2, "ASUS Dual RTX4060", "VGA", 16990, 5.0),
        product(3, "Gigabyte RTX 4060 Ti", "VGA", 12390, 4.5),
        product(4, "AMD Ryzen 7 7800X3D", "CPU", 11889, 4.0),
        product(5, "Kingston Fury 16GB", "RAM", 450, 3.5),
        product(6, "Intel Core i5", "CPU", 300, 3.0),
        product(7, "Corsair Vengeance 32GB", "RAM", 120, 4.8),
    ]
}

pub fn matches(filter: &ProductFilter, product: &Product) -> bool {
    filter
        .name
        .as_ref()
        .is_none_or(|name| product.name.to_lowercase().contains(&name.to_lowercase()))
        && filter
            .category
            .as_ref()
            .is_none_or(|category| &product.category == category)
        && filter
            .min_rating
            .is_none_or(|min_rating| product.rating >= min_rating)
        && filter.price.is_none_or(|range| range.contains(product.price))
}

fn compare(sort: SortOrder, a: &Product, b: &Product) -> Ordering {
    let (field, direction) = sort.key();
    let ordering = match field {
        SortField::Featured => a.featured.cmp(&b.featured),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Id => a.product_id.cmp(&b.product_id),
    };

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    pub products: Vec<Product>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductRepository {
    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: SortOrder,
        window: PageWindow,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut matching: Vec<Product> = self
            .products
            .iter()
            .filter(|p| matches(filter, p))
            .cloned()
            .collect();

        matching.sort_by(|a, b| compare(sort, a, b));

        Ok(matching
            .into_iter()
            .skip(window.offset() as usize)
            .take(window.limit() as usize)
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        Ok(self.products.iter().filter(|p| matches(filter, p)).count() as i64)
    }

    async fn find_categories(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.products.iter().map(|p| p.category.clone()).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.iter().find(|p| p.product_id == id).cloned())
    }
}

pub struct FailingProductRepository;

#[async_trait]
impl ProductQueryRepositoryTrait for FailingProductRepository {
    async fn find_page(
        &self,
        _filter: &ProductFilter,
        _sort: SortOrder,
        _window: PageWindow,
    ) -> Result<Vec<Product>, RepositoryError> {
        Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self, _filter: &ProductFilter) -> Result<i64, RepositoryError> {
        Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn find_categories(&self) -> Result<Vec<String>, RepositoryError> {
        Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Product>, RepositoryError> {
        Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Product>, RepositoryError> {
        Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

/// Mutable product table for the write side.
pub struct InMemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }

    pub fn len(&self) -> usize {
        self.products.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductStore {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.product_id).max().unwrap_or(0) + 1;

        let product = Product {
            product_id: id,
            name: req.name.clone(),
            slug: req.slug.clone(),
            category: req.category.clone(),
            brand: req.brand.clone(),
            image: req.image.clone(),
            price: req.price,
            count_in_stock: req.count_in_stock,
            rating: 0.0,
            num_reviews: 0,
            featured: req.featured,
            description: req.description.clone(),
            created_at: Some(created_at(id)),
            updated_at: None,
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.product_id == id)
            .ok_or(RepositoryError::NotFound)?;

        product.name = req.name.clone();
        product.slug = req.slug.clone();
        product.category = req.category.clone();
        product.brand = req.brand.clone();
        product.image = req.image.clone();
        product.price = req.price;
        product.count_in_stock = req.count_in_stock;
        product.description = req.description.clone();
        if let Some(featured) = req.featured {
            product.featured = featured;
        }

        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.product_id != id);

        if products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
