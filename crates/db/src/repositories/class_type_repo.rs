//! Repository for the `class_types` table.

use sqlx::{Executor, PgPool, Postgres};
use studio_core::types::DbId;

use crate::models::class_type::{ClassType, CreateClassType};

const COLUMNS: &str = "id, name, description, default_duration_minutes, level, color_code, \
                       is_active, created_at, updated_at";

pub struct ClassTypeRepo;

impl ClassTypeRepo {
    pub async fn create(pool: &PgPool, input: &CreateClassType) -> Result<ClassType, sqlx::Error> {
        let query = format!(
            "INSERT INTO class_types (name, description, default_duration_minutes, level, color_code)
             VALUES ($1, $2, COALESCE($3, 60), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.default_duration_minutes)
            .bind(&input.level)
            .bind(&input.color_code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<ClassType>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("SELECT {COLUMNS} FROM class_types WHERE id = $1");
        sqlx::query_as::<_, ClassType>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Active class types, alphabetically.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ClassType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM class_types WHERE is_active = true ORDER BY name");
        sqlx::query_as::<_, ClassType>(&query).fetch_all(pool).await
    }
}
