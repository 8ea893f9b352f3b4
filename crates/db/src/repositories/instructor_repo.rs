//! Repository for the `instructors` table.

use sqlx::{Executor, PgPool, Postgres};
use studio_core::profile::InstructorProfileUpdate;
use studio_core::types::DbId;

use crate::models::instructor::{CreateInstructor, Instructor};

const COLUMNS: &str =
    "id, first_name, last_name, email, phone, bio, specializations, is_active, created_at, updated_at";

pub struct InstructorRepo;

impl InstructorRepo {
    pub async fn create(pool: &PgPool, input: &CreateInstructor) -> Result<Instructor, sqlx::Error> {
        let query = format!(
            "INSERT INTO instructors (first_name, last_name, email, phone, bio, specializations)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Instructor>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.bio)
            .bind(&input.specializations)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Instructor>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("SELECT {COLUMNS} FROM instructors WHERE id = $1");
        sqlx::query_as::<_, Instructor>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Apply a profile edit. Returns `None` if no such instructor exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &InstructorProfileUpdate,
    ) -> Result<Option<Instructor>, sqlx::Error> {
        let query = format!(
            "UPDATE instructors SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                bio = COALESCE($5, bio),
                specializations = COALESCE($6, specializations)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Instructor>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.bio)
            .bind(&input.specializations)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<Instructor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM instructors WHERE is_active = true ORDER BY last_name, first_name"
        );
        sqlx::query_as::<_, Instructor>(&query).fetch_all(pool).await
    }
}
