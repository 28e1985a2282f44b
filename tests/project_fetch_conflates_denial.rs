use axum::extract::Path;
use sea_orm::{DatabaseBackend, MockDatabase};

use edu_triad::entities::project;
use edu_triad::entities::sea_orm_active_enums::RoleEnum;
use edu_triad::error::ApiError;
use edu_triad::extractor::AuthClaims;
use edu_triad::policy::Caller;
use edu_triad::routes::projects::route::get_project;
use edu_triad::static_service::DATABASE_CONNECTION;

/// A teacher fetching a project outside their tasks gets the same answer as
/// for a project that does not exist at all: a single 404-shaped denial.
#[tokio::test]
async fn single_project_fetch_hides_whether_denial_or_absence() {
    // The scoped select finds nothing, whether the row is missing or the
    // join filtered it away.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<project::Model>::new()])
        .into_connection();

    DATABASE_CONNECTION
        .set(db)
        .expect("mock connection already set");

    let caller = Caller {
        user_id: 7,
        role: RoleEnum::Teacher,
        email: "t@school.edu".to_string(),
        name: "Thu Nguyen".to_string(),
    };

    let result = get_project(AuthClaims(caller), Path(99)).await;

    match result {
        Err(ApiError::NotFound(msg)) => {
            assert_eq!(msg, "Project not found or access denied");
        }
        other => panic!("expected the conflated NotFound denial, got {other:?}"),
    }
}
