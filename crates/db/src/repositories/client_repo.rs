//! Repository for the `clients` table.

use sqlx::{Executor, PgPool, Postgres};
use studio_core::profile::ClientProfileUpdate;
use studio_core::types::DbId;

use crate::models::client::Client;

const COLUMNS: &str = "id, first_name, last_name, email, phone, created_at, updated_at";

pub struct ClientRepo;

impl ClientRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write profile fields for a token subject, creating the row on first
    /// edit. Only non-`None` fields overwrite stored values.
    pub async fn upsert_profile(
        pool: &PgPool,
        id: DbId,
        input: &ClientProfileUpdate,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (id, first_name, last_name, email, phone)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE SET
                first_name = COALESCE(EXCLUDED.first_name, clients.first_name),
                last_name = COALESCE(EXCLUDED.last_name, clients.last_name),
                email = COALESCE(EXCLUDED.email, clients.email),
                phone = COALESCE(EXCLUDED.phone, clients.phone)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Make sure a row exists for a token subject. Returns `true` if one was inserted.
    pub async fn ensure_exists<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("INSERT INTO clients (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
