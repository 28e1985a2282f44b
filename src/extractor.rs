use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::header;
use http::request::Parts;

use crate::config::{APP_CONFIG, AUTH_COOKIE_NAME};
use crate::error::ApiError;
use crate::policy::Caller;
use crate::utils::jwt::JwtManager;

/// Resolves the caller's identity from the auth cookie or a bearer header.
/// Every protected handler takes this extractor; the wrapped [`Caller`] is
/// then passed explicitly into the access-control policy.
pub struct AuthClaims(pub Caller);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(AUTH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| bearer_token(parts));

        let token = token.ok_or_else(|| {
            ApiError::Unauthenticated("Access denied. No token provided.".to_string())
        })?;

        let jwt_manager = JwtManager::new(APP_CONFIG.jwt_secret.clone());
        let claims = jwt_manager
            .verify_jwt(&token)
            .map_err(|_| ApiError::Unauthenticated("Invalid token".to_string()))?;

        Ok(AuthClaims(Caller {
            user_id: claims.id,
            role: claims.role,
            email: claims.email,
            name: claims.name,
        }))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}
