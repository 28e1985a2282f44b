pub mod sea_orm_active_enums;

pub mod assessment;
pub mod competency;
pub mod criteria;
pub mod feedback;
pub mod parent;
pub mod performance_level;
pub mod project;
pub mod project_attachment;
pub mod student;
pub mod task;
pub mod teacher;
pub mod user;
