use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::config::APP_CONFIG;
use crate::entities::{
    competency, criteria, performance_level, sea_orm_active_enums::RoleEnum, user,
};

/// The stock rubric: four competencies with their criteria, plus the shared
/// four-rung scale. Seeded only when the catalog is empty; admins can extend
/// it afterwards.
const DEFAULT_COMPETENCIES: &[(&str, &str, &[&str])] = &[
    (
        "Communication",
        "Expressing ideas clearly across audiences and media",
        &["Clarity of Expression", "Active Listening", "Audience Awareness"],
    ),
    (
        "Collaboration",
        "Working productively within a team",
        &["Teamwork", "Responsibility Sharing", "Conflict Resolution"],
    ),
    (
        "Critical Thinking",
        "Analyzing and evaluating information to solve problems",
        &["Analysis", "Evaluation", "Problem Solving"],
    ),
    (
        "Creativity",
        "Generating and refining original ideas",
        &["Originality", "Flexibility", "Elaboration"],
    ),
];

const DEFAULT_PERFORMANCE_LEVELS: &[(&str, i32)] = &[
    ("Emerging", 1),
    ("Developing", 2),
    ("Proficient", 3),
    ("Exemplary", 4),
];

pub async fn initialize_admin_user(db: &DatabaseConnection) -> Result<()> {
    let admin_email: &str = &APP_CONFIG.admin_email;
    let default_password: &str = &APP_CONFIG.admin_password;

    let existing_admin = user::Entity::find()
        .filter(user::Column::Email.eq(admin_email))
        .one(db)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password = bcrypt::hash(default_password, bcrypt::DEFAULT_COST)
        .context("Failed to hash admin password")?;

    user::ActiveModel {
        first_name: Set("System".to_string()),
        last_name: Set("Administrator".to_string()),
        email: Set(admin_email.to_string()),
        password_hash: Set(hashed_password),
        role: Set(RoleEnum::Admin),
        created_at: Set(Utc::now().naive_utc()),
        last_login: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .context("Failed to insert admin user")?;

    tracing::info!("Admin user created successfully");
    tracing::info!("  Email: {}", admin_email);
    tracing::warn!("Please change the default password after first login!");

    Ok(())
}

pub async fn seed_rubric_catalog(db: &DatabaseConnection) -> Result<()> {
    let existing = competency::Entity::find()
        .count(db)
        .await
        .context("Failed to check rubric catalog")?;

    if existing > 0 {
        tracing::info!("Rubric catalog already present, skipping seed");
        return Ok(());
    }

    tracing::info!("Seeding rubric catalog...");

    for (name, description, criteria_names) in DEFAULT_COMPETENCIES {
        let created = competency::ActiveModel {
            competency_name: Set(name.to_string()),
            competency_description: Set(Some(description.to_string())),
            ..Default::default()
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert competency {name}"))?;

        for criteria_name in *criteria_names {
            criteria::ActiveModel {
                competency_id: Set(created.competency_id),
                criteria_name: Set(criteria_name.to_string()),
                criteria_description: Set(None),
                ..Default::default()
            }
            .insert(db)
            .await
            .with_context(|| format!("Failed to insert criteria {criteria_name}"))?;
        }
    }

    for (level_name, score_value) in DEFAULT_PERFORMANCE_LEVELS {
        performance_level::ActiveModel {
            level_name: Set(level_name.to_string()),
            score_value: Set(*score_value),
            ..Default::default()
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert performance level {level_name}"))?;
    }

    tracing::info!("Rubric catalog seeded");

    Ok(())
}
