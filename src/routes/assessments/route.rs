use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};

use super::dto::{
    AssessmentItemRequest, AssessmentListResponse, AssessmentResponse, SubmitAssessmentRequest,
    SubmitAssessmentResponse,
};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{assessment, criteria};
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::policy;
use crate::repositories::assessment_repository::AssessmentItem;
use crate::repositories::{
    AssessmentRepository, CompetencyRepository, ProjectRepository, UserRepository,
};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/assessments", get(get_assessments))
        .route(
            "/api/assessments/project/{project_id}",
            get(get_project_assessments).post(submit_assessments),
        )
}

/// Every item must name a criterion that exists and belongs to the
/// competency on the same row.
fn validate_items(
    items: &[AssessmentItemRequest],
    criteria_by_id: &HashMap<i32, criteria::Model>,
) -> Result<(), String> {
    for item in items {
        match criteria_by_id.get(&item.criteria_id) {
            None => return Err(format!("Unknown criteria id {}", item.criteria_id)),
            Some(criterion) if criterion.competency_id != item.competency_id => {
                return Err(format!(
                    "Criteria {} does not belong to competency {}",
                    item.criteria_id, item.competency_id
                ));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

struct CatalogMaps {
    competencies: HashMap<i32, String>,
    criteria: HashMap<i32, String>,
    levels: HashMap<i32, (String, i32)>,
}

async fn catalog_maps() -> Result<CatalogMaps, ApiError> {
    let competency_repo = CompetencyRepository::new();

    Ok(CatalogMaps {
        competencies: competency_repo
            .list_all()
            .await?
            .into_iter()
            .map(|c| (c.competency_id, c.competency_name))
            .collect(),
        criteria: competency_repo
            .list_criteria()
            .await?
            .into_iter()
            .map(|c| (c.criteria_id, c.criteria_name))
            .collect(),
        levels: competency_repo
            .list_performance_levels()
            .await?
            .into_iter()
            .map(|l| (l.performance_level_id, (l.level_name, l.score_value)))
            .collect(),
    })
}

fn to_response(
    row: assessment::Model,
    maps: &CatalogMaps,
    project_title: Option<String>,
    teacher_name: Option<String>,
) -> AssessmentResponse {
    let (level_name, score_value) = maps
        .levels
        .get(&row.performance_level_id)
        .cloned()
        .unwrap_or_default();

    AssessmentResponse {
        assessment_id: row.assessment_id,
        project_id: row.project_id,
        competency_id: row.competency_id,
        competency_name: maps
            .competencies
            .get(&row.competency_id)
            .cloned()
            .unwrap_or_default(),
        criteria_id: row.criteria_id,
        criteria_name: maps
            .criteria
            .get(&row.criteria_id)
            .cloned()
            .unwrap_or_default(),
        performance_level_id: row.performance_level_id,
        level_name,
        score_value,
        comments: row.comments,
        assessment_date: row.assessment_date.to_string(),
        project_title,
        teacher_name,
    }
}

/// Role-filtered assessment history, newest first.
#[utoipa::path(
    get,
    path = "/api/assessments",
    responses(
        (status = 200, description = "Assessments retrieved", body = AssessmentListResponse),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn get_assessments(
    AuthClaims(caller): AuthClaims,
) -> Result<Json<AssessmentListResponse>, ApiError> {
    let assessment_repo = AssessmentRepository::new();
    let project_repo = ProjectRepository::new();

    let rows = assessment_repo.list_for_caller(&caller).await?;
    let maps = catalog_maps().await?;

    let projects = project_repo
        .find_by_ids(rows.iter().map(|a| a.project_id).collect())
        .await?;
    let titles: HashMap<i32, String> = projects
        .into_iter()
        .map(|p| (p.project_id, p.project_title))
        .collect();

    let assessments = rows
        .into_iter()
        .map(|a| {
            let title = titles.get(&a.project_id).cloned();
            to_response(a, &maps, title, None)
        })
        .collect();

    Ok(Json(AssessmentListResponse { assessments }))
}

/// Assessment rows for one project, behind the project access gate. Absence
/// and denial share one answer on this path.
#[utoipa::path(
    get,
    path = "/api/assessments/project/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Assessments retrieved", body = AssessmentListResponse),
        (status = 403, description = "Access denied or project not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn get_project_assessments(
    AuthClaims(caller): AuthClaims,
    Path(project_id): Path<i32>,
) -> Result<Json<AssessmentListResponse>, ApiError> {
    policy::accessible_project(&caller, project_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Access denied or project not found".to_string()))?;

    let assessment_repo = AssessmentRepository::new();
    let user_repo = UserRepository::new();

    let rows = assessment_repo.list_for_project(project_id).await?;
    let maps = catalog_maps().await?;

    let teachers = user_repo
        .find_teachers_by_ids(rows.iter().map(|a| a.teacher_id).collect())
        .await?;
    let users = user_repo
        .find_by_ids(teachers.iter().map(|t| t.user_id).collect())
        .await?;
    let user_names: HashMap<i32, String> = users
        .into_iter()
        .map(|u| (u.user_id, u.display_name()))
        .collect();
    let teacher_names: HashMap<i32, String> = teachers
        .into_iter()
        .filter_map(|t| {
            user_names
                .get(&t.user_id)
                .map(|name| (t.teacher_id, name.clone()))
        })
        .collect();

    let assessments = rows
        .into_iter()
        .map(|a| {
            let teacher_name = teacher_names.get(&a.teacher_id).cloned();
            to_response(a, &maps, None, teacher_name)
        })
        .collect();

    Ok(Json(AssessmentListResponse { assessments }))
}

/// The transactional write surface: N assessment rows, optional feedback and
/// the status flip land together or not at all.
#[utoipa::path(
    post,
    path = "/api/assessments/project/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = SubmitAssessmentRequest,
    responses(
        (status = 201, description = "Assessment submitted", body = SubmitAssessmentResponse),
        (status = 400, description = "Missing or invalid assessments"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Teacher record not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Assessments"
)]
pub async fn submit_assessments(
    AuthClaims(caller): AuthClaims,
    Path(project_id): Path<i32>,
    Json(payload): Json<SubmitAssessmentRequest>,
) -> Result<(StatusCode, Json<SubmitAssessmentResponse>), ApiError> {
    if caller.role != RoleEnum::Teacher && caller.role != RoleEnum::Admin {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    let items = payload.assessments.unwrap_or_default();
    if items.is_empty() {
        return Err(ApiError::InvalidInput(
            "Missing or invalid assessments".to_string(),
        ));
    }

    let user_repo = UserRepository::new();
    let teacher = user_repo
        .find_teacher_by_user_id(caller.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Teacher record not found".to_string()))?;

    let assessment_repo = AssessmentRepository::new();
    let project_repo = ProjectRepository::new();

    // Teachers must own the underlying task; admins only need the project to
    // exist. Either failure reads the same from outside.
    let accessible = if caller.role == RoleEnum::Admin {
        project_repo.find_by_id(project_id).await?.is_some()
    } else {
        assessment_repo
            .project_owned_by_teacher(project_id, teacher.teacher_id)
            .await?
    };
    if !accessible {
        return Err(ApiError::Forbidden(
            "Access denied or project not found".to_string(),
        ));
    }

    let competency_repo = CompetencyRepository::new();
    let criteria_by_id = competency_repo
        .find_criteria_by_ids(items.iter().map(|i| i.criteria_id).collect())
        .await?;
    validate_items(&items, &criteria_by_id).map_err(ApiError::InvalidInput)?;

    let items = items
        .into_iter()
        .map(|i| AssessmentItem {
            competency_id: i.competency_id,
            criteria_id: i.criteria_id,
            performance_level_id: i.performance_level_id,
            comments: i.comments,
        })
        .collect();

    assessment_repo
        .submit(
            project_id,
            teacher.teacher_id,
            caller.user_id,
            items,
            payload.feedback.filter(|f| !f.trim().is_empty()),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitAssessmentResponse {
            message: "Assessment submitted successfully".to_string(),
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

    fn criterion(criteria_id: i32, competency_id: i32) -> criteria::Model {
        criteria::Model {
            criteria_id,
            competency_id,
            criteria_name: format!("criterion-{criteria_id}"),
            criteria_description: None,
        }
    }

    fn item(competency_id: i32, criteria_id: i32) -> AssessmentItemRequest {
        AssessmentItemRequest {
            competency_id,
            criteria_id,
            performance_level_id: 3,
            comments: None,
        }
    }

    #[test]
    fn items_must_reference_criteria_of_their_competency() {
        let criteria_by_id = HashMap::from([(10, criterion(10, 1)), (20, criterion(20, 2))]);

        assert!(validate_items(&[item(1, 10), item(2, 20)], &criteria_by_id).is_ok());
        assert!(validate_items(&[item(2, 10)], &criteria_by_id).is_err());
        assert!(validate_items(&[item(1, 99)], &criteria_by_id).is_err());
    }

    #[tokio::test]
    async fn parents_can_never_write_assessments() {
        let result = submit_assessments(
            AuthClaims(caller(RoleEnum::Parent)),
            Path(1),
            Json(SubmitAssessmentRequest {
                assessments: Some(vec![item(1, 10)]),
                feedback: None,
            }),
        )
        .await;

        match result {
            Err(ApiError::Forbidden(_)) => {}
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn students_can_never_write_assessments() {
        let result = submit_assessments(
            AuthClaims(caller(RoleEnum::Student)),
            Path(1),
            Json(SubmitAssessmentRequest {
                assessments: Some(vec![item(1, 10)]),
                feedback: None,
            }),
        )
        .await;

        match result {
            Err(ApiError::Forbidden(_)) => {}
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn an_empty_items_array_is_rejected_up_front() {
        for assessments in [None, Some(Vec::new())] {
            let result = submit_assessments(
                AuthClaims(caller(RoleEnum::Teacher)),
                Path(1),
                Json(SubmitAssessmentRequest {
                    assessments,
                    feedback: None,
                }),
            )
            .await;

            match result {
                Err(ApiError::InvalidInput(msg)) => {
                    assert_eq!(msg, "Missing or invalid assessments")
                }
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }
}
