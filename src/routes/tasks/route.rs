use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};

use super::dto::{
    CreateTaskRequest, CreateTaskResponse, TaskDetailResponse, TaskListResponse,
    TaskMessageResponse, TaskResponse, UpdateTaskRequest,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::task;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::repositories::{TaskRepository, UserRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/tasks", get(get_tasks).post(create_task))
        .route(
            "/api/tasks/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}

/// Resolves teacher display names for a batch of tasks.
async fn teacher_names_for(tasks: &[task::Model]) -> Result<HashMap<i32, String>, ApiError> {
    let user_repo = UserRepository::new();

    let teacher_rows = user_repo
        .find_teachers_by_ids(tasks.iter().map(|t| t.teacher_id).collect())
        .await?;
    let users = user_repo
        .find_by_ids(teacher_rows.iter().map(|t| t.user_id).collect())
        .await?;

    let user_names: HashMap<i32, String> = users
        .into_iter()
        .map(|u| (u.user_id, u.display_name()))
        .collect();

    Ok(teacher_rows
        .into_iter()
        .filter_map(|t| {
            user_names
                .get(&t.user_id)
                .map(|name| (t.teacher_id, name.clone()))
        })
        .collect())
}

fn to_response(task: task::Model, teacher_name: Option<String>) -> TaskResponse {
    TaskResponse {
        task_id: task.task_id,
        teacher_id: task.teacher_id,
        task_name: task.task_name,
        task_description: task.task_description,
        due_date: task.due_date.to_string(),
        created_at: task.created_at.to_string(),
        teacher_name,
    }
}

/// Role-scoped task listing, soonest due date first.
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Tasks retrieved", body = TaskListResponse),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn get_tasks(AuthClaims(caller): AuthClaims) -> Result<Json<TaskListResponse>, ApiError> {
    let task_repo = TaskRepository::new();
    let tasks = task_repo.list_for_caller(&caller).await?;
    let names = teacher_names_for(&tasks).await?;

    let tasks = tasks
        .into_iter()
        .map(|t| {
            let name = names.get(&t.teacher_id).cloned();
            to_response(t, name)
        })
        .collect();

    Ok(Json(TaskListResponse { tasks }))
}

#[utoipa::path(
    get,
    path = "/api/tasks/{task_id}",
    params(("task_id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task retrieved", body = TaskDetailResponse),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn get_task(
    AuthClaims(_caller): AuthClaims,
    Path(task_id): Path<i32>,
) -> Result<Json<TaskDetailResponse>, ApiError> {
    let task_repo = TaskRepository::new();

    let found = task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let names = teacher_names_for(std::slice::from_ref(&found)).await?;
    let name = names.get(&found.teacher_id).cloned();

    Ok(Json(TaskDetailResponse {
        task: to_response(found, name),
    }))
}

/// Task creation is teacher/admin-only and stamps the caller's teacher row
/// as owner.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = CreateTaskResponse),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Teacher record not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn create_task(
    AuthClaims(caller): AuthClaims,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), ApiError> {
    if caller.role != RoleEnum::Teacher && caller.role != RoleEnum::Admin {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    if payload.task_name.trim().is_empty() || payload.task_description.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Missing required fields".to_string(),
        ));
    }

    let user_repo = UserRepository::new();
    let teacher = user_repo
        .find_teacher_by_user_id(caller.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Teacher record not found".to_string()))?;

    let task_repo = TaskRepository::new();
    let created = task_repo
        .create(
            teacher.teacher_id,
            payload.task_name,
            payload.task_description,
            payload.due_date,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            message: "Task created successfully".to_string(),
            task_id: created.task_id,
        }),
    ))
}

/// Updates require ownership of the task unless the caller is an admin.
#[utoipa::path(
    put,
    path = "/api/tasks/{task_id}",
    params(("task_id" = i32, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskMessageResponse),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Not the task owner"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn update_task(
    AuthClaims(caller): AuthClaims,
    Path(task_id): Path<i32>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskMessageResponse>, ApiError> {
    if caller.role != RoleEnum::Teacher && caller.role != RoleEnum::Admin {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    if payload.task_name.trim().is_empty() || payload.task_description.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Missing required fields".to_string(),
        ));
    }

    let task_repo = TaskRepository::new();

    task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    if caller.role != RoleEnum::Admin && !task_repo.owned_by_user(task_id, caller.user_id).await? {
        return Err(ApiError::Forbidden(
            "Access denied. You don't own this task.".to_string(),
        ));
    }

    task_repo
        .update(
            task_id,
            payload.task_name,
            payload.task_description,
            payload.due_date,
        )
        .await?;

    Ok(Json(TaskMessageResponse {
        message: "Task updated successfully".to_string(),
    }))
}

/// Deletion is refused while projects still reference the task.
#[utoipa::path(
    delete,
    path = "/api/tasks/{task_id}",
    params(("task_id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted", body = TaskMessageResponse),
        (status = 400, description = "Task still has projects"),
        (status = 403, description = "Not the task owner"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
pub async fn delete_task(
    AuthClaims(caller): AuthClaims,
    Path(task_id): Path<i32>,
) -> Result<Json<TaskMessageResponse>, ApiError> {
    if caller.role != RoleEnum::Teacher && caller.role != RoleEnum::Admin {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    let task_repo = TaskRepository::new();

    task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    if caller.role != RoleEnum::Admin && !task_repo.owned_by_user(task_id, caller.user_id).await? {
        return Err(ApiError::Forbidden(
            "Access denied. You don't own this task.".to_string(),
        ));
    }

    if task_repo.project_count(task_id).await? > 0 {
        return Err(ApiError::InvalidInput(
            "Cannot delete task with associated projects. Update the task instead.".to_string(),
        ));
    }

    task_repo.delete(task_id).await?;

    Ok(Json(TaskMessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
