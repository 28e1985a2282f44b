use std::collections::HashMap;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, put},
};
use serde_json::json;

use super::dto::{
    ChangePasswordRequest, ChangePasswordResponse, ChildInfo, ProfileResponse, ProfileUser,
    StudentListResponse, StudentSummary, UpdateProfileRequest, UpdateProfileResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::repositories::UserRepository;

pub fn create_route() -> Router {
    Router::new()
        .route("/api/users/profile", get(get_profile).put(update_profile))
        .route("/api/users/change-password", put(change_password))
        .route("/api/users/students", get(get_students))
}

/// Profile fetch, enriched with the caller's role-subtype record.
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Profile retrieved", body = ProfileResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_profile(AuthClaims(caller): AuthClaims) -> Result<Json<ProfileResponse>, ApiError> {
    let user_repo = UserRepository::new();

    let user_info = user_repo
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let mut role_info = None;
    let mut children = None;

    match user_info.role {
        RoleEnum::Student => {
            if let Some(student) = user_repo.find_student_by_user_id(caller.user_id).await? {
                role_info = Some(json!({
                    "studentId": student.student_id,
                    "grade": student.grade,
                    "parentId": student.parent_id,
                    "registrationDate": student.registration_date.map(|d| d.to_string()),
                }));
            }
        }
        RoleEnum::Teacher => {
            if let Some(teacher) = user_repo.find_teacher_by_user_id(caller.user_id).await? {
                role_info = Some(json!({
                    "teacherId": teacher.teacher_id,
                    "hireDate": teacher.hire_date.map(|d| d.to_string()),
                }));
            }
        }
        RoleEnum::Parent => {
            if let Some(parent) = user_repo.find_parent_by_user_id(caller.user_id).await? {
                role_info = Some(json!({ "parentId": parent.parent_id }));

                let child_rows = user_repo.find_children_of_parent(parent.parent_id).await?;
                let child_users = user_repo
                    .find_by_ids(child_rows.iter().map(|s| s.user_id).collect())
                    .await?;
                let names: HashMap<i32, String> = child_users
                    .into_iter()
                    .map(|u| (u.user_id, u.display_name()))
                    .collect();

                children = Some(
                    child_rows
                        .into_iter()
                        .map(|s| ChildInfo {
                            student_id: s.student_id,
                            student_name: names.get(&s.user_id).cloned().unwrap_or_default(),
                            grade: s.grade,
                        })
                        .collect(),
                );
            }
        }
        RoleEnum::Admin => {}
    }

    Ok(Json(ProfileResponse {
        user: ProfileUser {
            id: user_info.user_id,
            first_name: user_info.first_name,
            last_name: user_info.last_name,
            email: user_info.email,
            role: user_info.role.as_str().to_string(),
            created_at: user_info.created_at.to_string(),
            last_login: user_info.last_login.map(|d| d.to_string()),
            role_info,
            children,
        },
    }))
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UpdateProfileResponse),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_profile(
    AuthClaims(caller): AuthClaims,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
    {
        return Err(ApiError::InvalidInput(
            "Missing required fields".to_string(),
        ));
    }

    let user_repo = UserRepository::new();

    if user_repo
        .email_used_by_other(&payload.email, caller.user_id)
        .await?
    {
        return Err(ApiError::Conflict("Email is already in use".to_string()));
    }

    user_repo
        .update_profile(
            caller.user_id,
            payload.first_name,
            payload.last_name,
            payload.email,
        )
        .await?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/users/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ChangePasswordResponse),
        (status = 400, description = "Missing passwords"),
        (status = 401, description = "Current password is incorrect"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn change_password(
    AuthClaims(caller): AuthClaims,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ChangePasswordResponse>, ApiError> {
    if payload.current_password.is_empty() || payload.new_password.is_empty() {
        return Err(ApiError::InvalidInput(
            "Current and new passwords are required".to_string(),
        ));
    }

    let user_repo = UserRepository::new();

    let user_info = user_repo
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let password_valid = bcrypt::verify(&payload.current_password, &user_info.password_hash)
        .map_err(|e| ApiError::StorageFailure(e.into()))?;

    if !password_valid {
        return Err(ApiError::Unauthenticated(
            "Current password is incorrect".to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&payload.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::StorageFailure(e.into()))?;

    user_repo
        .update_password(caller.user_id, password_hash)
        .await?;

    Ok(Json(ChangePasswordResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// Teachers see students who have submitted against their tasks; admins see
/// everyone.
#[utoipa::path(
    get,
    path = "/api/users/students",
    responses(
        (status = 200, description = "Students retrieved", body = StudentListResponse),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_students(
    AuthClaims(caller): AuthClaims,
) -> Result<(StatusCode, Json<StudentListResponse>), ApiError> {
    if caller.role != RoleEnum::Teacher && caller.role != RoleEnum::Admin {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    let user_repo = UserRepository::new();

    let students = match caller.role {
        RoleEnum::Teacher => user_repo.find_students_of_teacher(caller.user_id).await?,
        _ => user_repo.find_all_students().await?,
    };

    let users = user_repo
        .find_by_ids(students.iter().map(|s| s.user_id).collect())
        .await?;
    let names: HashMap<i32, String> = users
        .into_iter()
        .map(|u| (u.user_id, u.display_name()))
        .collect();

    let students = students
        .into_iter()
        .map(|s| StudentSummary {
            student_id: s.student_id,
            user_id: s.user_id,
            student_name: names.get(&s.user_id).cloned().unwrap_or_default(),
            grade: s.grade,
            parent_id: s.parent_id,
        })
        .collect();

    Ok((StatusCode::OK, Json(StudentListResponse { students })))
}
