use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::feedback;
use crate::static_service::DATABASE_CONNECTION;

pub struct FeedbackRepository;

impl FeedbackRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn list_for_project(&self, project_id: i32) -> Result<Vec<feedback::Model>> {
        let db = self.get_connection();
        let rows = feedback::Entity::find()
            .filter(feedback::Column::ProjectId.eq(project_id))
            .order_by_desc(feedback::Column::FeedbackDate)
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn create(
        &self,
        project_id: i32,
        user_id: i32,
        feedback_text: String,
    ) -> Result<feedback::Model> {
        let db = self.get_connection();
        let created = feedback::ActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
            feedback_text: Set(feedback_text),
            feedback_date: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(created)
    }
}
