use crate::{abstract_trait::HashingTrait, errors::ServiceError};
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash};

#[derive(Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashingTrait for Hashing {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let hashed = hash(password, self.cost).map_err(ServiceError::Bcrypt)?;
        Ok(hashed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashed_password_is_not_plaintext_and_verifies() {
        let hashing = Hashing::with_cost(4);

        let hashed = hashing.hash_password("12345633333").await.unwrap();

        assert_ne!(hashed, "12345633333");
        assert!(bcrypt::verify("12345633333", &hashed).unwrap());
    }

    #[tokio::test]
    async fn each_hash_is_salted() {
        let hashing = Hashing::with_cost(4);

        let first = hashing.hash_password("secret").await.unwrap();
        let second = hashing.hash_password("secret").await.unwrap();

        assert_ne!(first, second);
        assert!(!bcrypt::verify("not-secret", &first).unwrap());
    }
}
