use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::route::health,
        routes::auth::route::register,
        routes::auth::route::login,
        routes::auth::route::logout,
        routes::auth::route::me,
        routes::users::route::get_profile,
        routes::users::route::update_profile,
        routes::users::route::change_password,
        routes::users::route::get_students,
        routes::tasks::route::get_tasks,
        routes::tasks::route::get_task,
        routes::tasks::route::create_task,
        routes::tasks::route::update_task,
        routes::tasks::route::delete_task,
        routes::projects::route::get_projects,
        routes::projects::route::get_project,
        routes::projects::route::create_project,
        routes::projects::route::update_status,
        routes::assessments::route::get_assessments,
        routes::assessments::route::get_project_assessments,
        routes::assessments::route::submit_assessments,
        routes::competencies::route::get_competencies,
        routes::competencies::route::get_criteria,
        routes::competencies::route::get_performance_levels,
        routes::competencies::route::get_student_progress,
        routes::competencies::route::create_competency,
        routes::feedback::route::get_project_feedback,
        routes::feedback::route::create_feedback,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login and identity"),
        (name = "Users", description = "Profiles and student rosters"),
        (name = "Tasks", description = "Teacher-authored assignments"),
        (name = "Projects", description = "Student project submissions"),
        (name = "Assessments", description = "Competency assessment records"),
        (name = "Competencies", description = "Rubric catalog and progress"),
        (name = "Feedback", description = "Project commentary"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
