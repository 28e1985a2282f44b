use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};

use super::dto::{
    CompetencyListResponse, CompetencyProgressResponse, CompetencyResponse,
    CreateCompetencyRequest, CreateCompetencyResponse, CriteriaListResponse, CriteriaResponse,
    PerformanceLevelListResponse, PerformanceLevelResponse, ProgressResponse, ProgressStudent,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::policy;
use crate::repositories::competency_repository::compute_progress;
use crate::repositories::{AssessmentRepository, CompetencyRepository, UserRepository};

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/api/competencies",
            get(get_competencies).post(create_competency),
        )
        .route("/api/competencies/criteria", get(get_criteria))
        .route(
            "/api/competencies/performance-levels",
            get(get_performance_levels),
        )
        .route(
            "/api/competencies/progress/{student_id}",
            get(get_student_progress),
        )
}

#[utoipa::path(
    get,
    path = "/api/competencies",
    responses(
        (status = 200, description = "Competencies retrieved", body = CompetencyListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn get_competencies(
    AuthClaims(_caller): AuthClaims,
) -> Result<Json<CompetencyListResponse>, ApiError> {
    let competency_repo = CompetencyRepository::new();

    let competencies = competency_repo
        .list_all()
        .await?
        .into_iter()
        .map(|c| CompetencyResponse {
            competency_id: c.competency_id,
            competency_name: c.competency_name,
            competency_description: c.competency_description,
        })
        .collect();

    Ok(Json(CompetencyListResponse { competencies }))
}

#[utoipa::path(
    get,
    path = "/api/competencies/criteria",
    responses(
        (status = 200, description = "Criteria retrieved", body = CriteriaListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn get_criteria(
    AuthClaims(_caller): AuthClaims,
) -> Result<Json<CriteriaListResponse>, ApiError> {
    let competency_repo = CompetencyRepository::new();

    let competency_names: HashMap<i32, String> = competency_repo
        .list_all()
        .await?
        .into_iter()
        .map(|c| (c.competency_id, c.competency_name))
        .collect();

    let criteria = competency_repo
        .list_criteria()
        .await?
        .into_iter()
        .map(|c| CriteriaResponse {
            criteria_id: c.criteria_id,
            competency_id: c.competency_id,
            competency_name: competency_names
                .get(&c.competency_id)
                .cloned()
                .unwrap_or_default(),
            criteria_name: c.criteria_name,
            criteria_description: c.criteria_description,
        })
        .collect();

    Ok(Json(CriteriaListResponse { criteria }))
}

#[utoipa::path(
    get,
    path = "/api/competencies/performance-levels",
    responses(
        (status = 200, description = "Performance levels retrieved", body = PerformanceLevelListResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn get_performance_levels(
    AuthClaims(_caller): AuthClaims,
) -> Result<Json<PerformanceLevelListResponse>, ApiError> {
    let competency_repo = CompetencyRepository::new();

    let levels = competency_repo
        .list_performance_levels()
        .await?
        .into_iter()
        .map(|l| PerformanceLevelResponse {
            performance_level_id: l.performance_level_id,
            level_name: l.level_name,
            score_value: l.score_value,
        })
        .collect();

    Ok(Json(PerformanceLevelListResponse { levels }))
}

/// Aggregated competency standing for one student: the full catalog with a
/// percentage per competency, zero where nothing has been assessed yet.
#[utoipa::path(
    get,
    path = "/api/competencies/progress/{student_id}",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Progress retrieved", body = ProgressResponse),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn get_student_progress(
    AuthClaims(caller): AuthClaims,
    Path(student_id): Path<i32>,
) -> Result<Json<ProgressResponse>, ApiError> {
    if !policy::can_access_student(&caller, student_id).await? {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    let user_repo = UserRepository::new();
    let (student, student_user) = user_repo
        .find_student_with_user(student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    let competency_repo = CompetencyRepository::new();
    let assessment_repo = AssessmentRepository::new();

    let competencies = competency_repo.list_all().await?;
    let assessments = assessment_repo.list_for_student(student_id).await?;

    // One catalog read serves both the score lookup and the dynamic maximum.
    let levels = competency_repo.list_performance_levels().await?;
    let score_by_level: HashMap<i32, i32> = levels
        .iter()
        .map(|l| (l.performance_level_id, l.score_value))
        .collect();
    let max_possible = levels.iter().map(|l| l.score_value).max();

    let progress = compute_progress(&competencies, &assessments, &score_by_level, max_possible)
        .into_iter()
        .map(|p| CompetencyProgressResponse {
            competency_id: p.competency_id,
            competency_name: p.competency_name,
            average_score: p.average_score,
            percentage_score: p.percentage_score,
            project_count: p.project_count,
            max_score_observed: p.max_score_observed,
        })
        .collect();

    Ok(Json(ProgressResponse {
        student: ProgressStudent {
            student_id: student.student_id,
            student_name: student_user.map(|u| u.display_name()).unwrap_or_default(),
            grade: student.grade,
        },
        progress,
    }))
}

/// Catalog writes are admin-only; competency names are unique.
#[utoipa::path(
    post,
    path = "/api/competencies",
    request_body = CreateCompetencyRequest,
    responses(
        (status = 201, description = "Competency created", body = CreateCompetencyResponse),
        (status = 400, description = "Competency name is required"),
        (status = 403, description = "Admins only"),
        (status = 409, description = "Competency already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Competencies"
)]
pub async fn create_competency(
    AuthClaims(caller): AuthClaims,
    Json(payload): Json<CreateCompetencyRequest>,
) -> Result<(StatusCode, Json<CreateCompetencyResponse>), ApiError> {
    if caller.role != RoleEnum::Admin {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    if payload.competency_name.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Competency name is required".to_string(),
        ));
    }

    let competency_repo = CompetencyRepository::new();

    if competency_repo
        .find_by_name(&payload.competency_name)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Competency already exists".to_string()));
    }

    let created = competency_repo
        .create(payload.competency_name, payload.competency_description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCompetencyResponse {
            message: "Competency created successfully".to_string(),
            competency_id: created.competency_id,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Caller;

    fn caller(role: RoleEnum) -> Caller {
        Caller {
            user_id: 1,
            role,
            email: "caller@school.edu".to_string(),
            name: "Test Caller".to_string(),
        }
    }

    #[tokio::test]
    async fn only_admins_may_create_competencies() {
        for role in [RoleEnum::Student, RoleEnum::Teacher, RoleEnum::Parent] {
            let result = create_competency(
                AuthClaims(caller(role)),
                Json(CreateCompetencyRequest {
                    competency_name: "Resilience".to_string(),
                    competency_description: None,
                }),
            )
            .await;

            match result {
                Err(ApiError::Forbidden(_)) => {}
                other => panic!("expected Forbidden for {role:?}, got {other:?}"),
            }
        }
    }
}
