use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub user_id: i64,
    pub is_admin: bool,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(user_id: i64, is_admin: bool, exp: usize, iat: usize) -> Self {
        Claims {
            user_id,
            is_admin,
            exp,
            iat,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i64, is_admin: bool) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + Duration::days(30)).timestamp() as usize;

        let claims = Claims::new(user_id, is_admin, exp, iat);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(ServiceError::Jwt)?;

        let current_time = Utc::now().timestamp() as usize;

        if token_data.claims.exp < current_time {
            return Err(ServiceError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_admin_flag() {
        let jwt = JwtConfig::new("test-secret");

        let token = jwt.generate_token(7, true).unwrap();
        let claims = jwt.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert!(claims.is_admin);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtConfig::new("secret-a");
        let verifier = JwtConfig::new("secret-b");

        let token = issuer.generate_token(1, false).unwrap();

        assert!(matches!(
            verifier.verify_token(&token),
            Err(ServiceError::Jwt(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtConfig::new("test-secret");
        let past = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let claims = Claims::new(3, false, past, past);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(jwt.verify_token(&token).is_err());
    }
}
