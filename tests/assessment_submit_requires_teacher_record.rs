use axum::extract::Path;
use axum::Json;
use sea_orm::{DatabaseBackend, MockDatabase};

use edu_triad::entities::sea_orm_active_enums::RoleEnum;
use edu_triad::entities::teacher;
use edu_triad::error::ApiError;
use edu_triad::extractor::AuthClaims;
use edu_triad::policy::Caller;
use edu_triad::routes::assessments::dto::{AssessmentItemRequest, SubmitAssessmentRequest};
use edu_triad::routes::assessments::route::submit_assessments;
use edu_triad::static_service::DATABASE_CONNECTION;

/// Submission resolves the caller's teacher row before anything is written;
/// a caller without one is turned away with NotFound.
#[tokio::test]
async fn submission_without_a_teacher_record_writes_nothing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<teacher::Model>::new()])
        .into_connection();

    DATABASE_CONNECTION
        .set(db)
        .expect("mock connection already set");

    let caller = Caller {
        user_id: 42,
        role: RoleEnum::Teacher,
        email: "t@school.edu".to_string(),
        name: "Thu Nguyen".to_string(),
    };

    let result = submit_assessments(
        AuthClaims(caller),
        Path(1),
        Json(SubmitAssessmentRequest {
            assessments: Some(vec![AssessmentItemRequest {
                competency_id: 1,
                criteria_id: 10,
                performance_level_id: 3,
                comments: None,
            }]),
            feedback: None,
        }),
    )
    .await;

    match result {
        Err(ApiError::NotFound(msg)) => assert_eq!(msg, "Teacher record not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
