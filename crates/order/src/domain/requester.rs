use crate::model::order::Order;
use shared::{config::Claims, errors::ServiceError};

/// Authenticated caller of an order operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: i32,
    pub is_admin: bool,
}

impl Requester {
    pub fn new(user_id: i32, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Owners see their own orders, admins see every order.
    pub fn can_access(&self, order: &Order) -> bool {
        self.is_admin || order.user_id == self.user_id
    }
}

impl TryFrom<&Claims> for Requester {
    type Error = ServiceError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let user_id = i32::try_from(claims.user_id).map_err(|_| {
            ServiceError::Forbidden(format!("Unknown user id {}", claims.user_id))
        })?;

        Ok(Self::new(user_id, claims.is_admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_outside_the_id_range_are_refused() {
        let claims = Claims::new(i64::MAX, false, 0, 0);
        assert!(matches!(
            Requester::try_from(&claims),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn claims_carry_admin_flag() {
        let claims = Claims::new(7, true, 0, 0);
        assert_eq!(Requester::try_from(&claims).unwrap(), Requester::new(7, true));
    }
}
