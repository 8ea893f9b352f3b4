//! Class type reference data.

use chrono::TimeDelta;
use serde::Serialize;
use sqlx::FromRow;
use studio_core::booking::class_duration;
use studio_core::types::{DbId, Timestamp};

/// A row from the `class_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassType {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub default_duration_minutes: i32,
    pub level: Option<String>,
    pub color_code: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClassType {
    pub fn duration(&self) -> TimeDelta {
        class_duration(Some(self.default_duration_minutes))
    }
}

/// DTO for creating a class type.
#[derive(Debug, Clone)]
pub struct CreateClassType {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to 60 if omitted.
    pub default_duration_minutes: Option<i32>,
    pub level: Option<String>,
    pub color_code: Option<String>,
}
