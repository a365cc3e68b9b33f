//! Fixed sample data written by the seeding endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SAMPLE_PASSWORD: &str = "12345633333";

#[derive(Debug, Clone, PartialEq)]
pub struct SampleProduct {
    pub name: &'static str,
    pub slug: &'static str,
    pub category: &'static str,
    pub brand: &'static str,
    pub image: &'static str,
    pub price: i64,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub description: &'static str,
}

/// Sample account before its password is hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleUser {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeedSummary {
    pub created_products: u64,
    pub created_users: u64,
}

pub fn sample_products() -> Vec<SampleProduct> {
    vec![
        SampleProduct {
            name: "CPU Intel Core i7",
            slug: "cpu-intel-core-i7",
            category: "CPU - Bộ vi xử lý",
            brand: "Intel",
            image: "/images/cpu-intel-core-i7.jpg",
            price: 6_990_000,
            count_in_stock: 100,
            rating: 4.0,
            num_reviews: 4,
            description: "12700K 12C/20T ( 3.60 GHz up to 5.00 GHz ) Hàng NK",
        },
        SampleProduct {
            name: "Card Màn Hình ASUS DUAL RTX4060",
            slug: "asus-dual-rtx4060",
            category: "VGA - Card màn hình",
            brand: "ASUS",
            image: "/images/asus-dual-rtx4060.jpg",
            price: 16_990_000,
            count_in_stock: 10,
            rating: 5.0,
            num_reviews: 2,
            description: "Đang cập nhật...",
        },
        SampleProduct {
            name: "Card Màn Hình Gigabyte GeForce RTX 4060 Ti",
            slug: "gigabyte-geforce-rtx-4060ti",
            category: "VGA - Card màn hình",
            brand: "Gigabyte",
            image: "/images/gigabyte-geforce-rtx-4060ti.jpg",
            price: 12_390_000,
            count_in_stock: 0,
            rating: 4.5,
            num_reviews: 1,
            description: "Bảo Hành 36 Tháng",
        },
        SampleProduct {
            name: "CPU AMD Ryzen 7 7800X3D",
            slug: "cpu-amd-ryzen7",
            category: "CPU - Bộ vi xử lý",
            brand: "AMD",
            image: "/images/cpu-amd-ryzen7.jpg",
            price: 11_889_000,
            count_in_stock: 100,
            rating: 4.0,
            num_reviews: 4,
            description: "4.2GHz Boost 5.0GHz / 8 nhân 16 luồng / 104MB / AM5",
        },
    ]
}

pub fn sample_users() -> Vec<SampleUser> {
    vec![
        SampleUser {
            name: "Admin",
            email: "admin01@gmail.com",
            password: SAMPLE_PASSWORD,
            is_admin: true,
        },
        SampleUser {
            name: "User",
            email: "user01@gmail.com",
            password: SAMPLE_PASSWORD,
            is_admin: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_slugs_are_unique() {
        let products = sample_products();
        let slugs: HashSet<_> = products.iter().map(|p| p.slug).collect();

        assert_eq!(products.len(), 4);
        assert_eq!(slugs.len(), products.len());
    }

    #[test]
    fn exactly_one_sample_admin() {
        let admins = sample_users().iter().filter(|u| u.is_admin).count();
        assert_eq!(admins, 1);
    }
}
