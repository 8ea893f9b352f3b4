use serde::Serialize;
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `instructors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Instructor {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specializations: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateInstructor {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specializations: Vec<String>,
}
