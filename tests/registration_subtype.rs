use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};

use edu_triad::entities::sea_orm_active_enums::RoleEnum;
use edu_triad::entities::{student, user};
use edu_triad::repositories::UserRepository;
use edu_triad::static_service::DATABASE_CONNECTION;

/// Registration inserts the user row and its role-subtype row inside one
/// transaction; the returned model is the inserted user.
#[tokio::test]
async fn registration_creates_user_and_student_subtype_together() {
    let now = Utc::now().naive_utc();

    let user_row = user::Model {
        user_id: 1,
        first_name: "Sam".to_string(),
        last_name: "Lee".to_string(),
        email: "sam@school.edu".to_string(),
        password_hash: "bcrypt-hash".to_string(),
        role: RoleEnum::Student,
        created_at: now,
        last_login: None,
    };
    let student_row = student::Model {
        student_id: 1,
        user_id: 1,
        parent_id: None,
        grade: None,
        registration_date: Some(now.date()),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row.clone()]])
        .append_query_results([vec![student_row]])
        .into_connection();

    DATABASE_CONNECTION
        .set(db)
        .expect("mock connection already set");

    let repo = UserRepository::new();
    let created = repo
        .register(
            "Sam".to_string(),
            "Lee".to_string(),
            "sam@school.edu".to_string(),
            "bcrypt-hash".to_string(),
            RoleEnum::Student,
        )
        .await
        .expect("registration should succeed");

    assert_eq!(created.user_id, 1);
    assert_eq!(created.email, "sam@school.edu");
    assert_eq!(created.role, RoleEnum::Student);
}
