use axum::{Json, Router, http::StatusCode, routing::get, routing::post};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::dto::{
    LoginRequest, LoginResponse, LogoutResponse, MeResponse, RegisterRequest, RegisterResponse,
    UserInfo,
};
use crate::config::{APP_CONFIG, AUTH_COOKIE_NAME, JWT_EXPIRY_TIME};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::repositories::UserRepository;
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

/// Registration creates the user and its role-subtype record together.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn register(
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::InvalidInput(
            "Missing required fields".to_string(),
        ));
    }

    let role = RoleEnum::parse(&payload.role)
        .ok_or_else(|| ApiError::InvalidInput("Invalid role".to_string()))?;

    let user_repo = UserRepository::new();

    if user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::StorageFailure(e.into()))?;

    user_repo
        .register(
            payload.first_name,
            payload.last_name,
            payload.email,
            password_hash,
            role,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Verifies credentials and issues the 7-day identity token, both as a
/// response field and as an HTTP-only cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::InvalidInput(
            "Email and password are required".to_string(),
        ));
    }

    let user_repo = UserRepository::new();

    let user_info = user_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid credentials".to_string()))?;

    let password_valid = bcrypt::verify(&payload.password, &user_info.password_hash)
        .map_err(|e| ApiError::StorageFailure(e.into()))?;

    if !password_valid {
        return Err(ApiError::Unauthenticated("Invalid credentials".to_string()));
    }

    user_repo.update_last_login(user_info.user_id).await?;

    let jwt_manager = JwtManager::new(APP_CONFIG.jwt_secret.clone());
    let token = jwt_manager
        .create_jwt(
            user_info.user_id,
            &user_info.email,
            user_info.role,
            &user_info.display_name(),
            JWT_EXPIRY_TIME,
        )
        .map_err(ApiError::StorageFailure)?;

    let cookie = Cookie::build((AUTH_COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(JWT_EXPIRY_TIME))
        .build();

    let response = LoginResponse {
        user: UserInfo {
            id: user_info.user_id,
            email: user_info.email.clone(),
            name: user_info.display_name(),
            role: user_info.role.as_str().to_string(),
        },
        token,
    };

    Ok((jar.add(cookie), Json(response)))
}

/// Clears the auth cookie. The token itself simply ages out.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse)
    ),
    tag = "Authentication"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let cookie = Cookie::build((AUTH_COOKIE_NAME, "")).path("/").build();

    (
        jar.remove(cookie),
        Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Resolves the caller's identity from a valid token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(AuthClaims(caller): AuthClaims) -> Result<Json<MeResponse>, ApiError> {
    let user_repo = UserRepository::new();

    let user_info = user_repo
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(MeResponse {
        user: UserInfo {
            id: user_info.user_id,
            email: user_info.email.clone(),
            name: user_info.display_name(),
            role: user_info.role.as_str().to_string(),
        },
    }))
}
