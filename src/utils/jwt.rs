use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::RoleEnum;

/// Claims carried by the identity token. Field names are part of the wire
/// contract with existing callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i32,
    pub email: String,
    pub role: RoleEnum,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: i32,
        email: &str,
        role: RoleEnum,
        name: &str,
        validity_secs: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: user_id,
            email: email.to_string(),
            role,
            name: name.to_string(),
            iat: now,
            exp: now + validity_secs,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn verify_jwt(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_identity_fields() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_jwt(42, "t@school.edu", RoleEnum::Teacher, "Thu Nguyen", 3600)
            .unwrap();

        let claims = manager.verify_jwt(&token).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "t@school.edu");
        assert_eq!(claims.role, RoleEnum::Teacher);
        assert_eq!(claims.name, "Thu Nguyen");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verification_rejects_a_foreign_secret() {
        let token = JwtManager::new("secret-a")
            .create_jwt(1, "s@school.edu", RoleEnum::Student, "Sam Lee", 3600)
            .unwrap();

        assert!(JwtManager::new("secret-b").verify_jwt(&token).is_err());
    }

    #[test]
    fn verification_rejects_an_expired_token() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_jwt(7, "p@school.edu", RoleEnum::Parent, "Pat Kim", -120)
            .unwrap();

        assert!(manager.verify_jwt(&token).is_err());
    }
}
