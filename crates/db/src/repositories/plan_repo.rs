//! Repository for the `plans_mat` and `plans_reformer` tables.

use sqlx::{Executor, PgPool, Postgres};
use studio_core::subscription::PlanKind;
use studio_core::types::DbId;

use crate::models::plan::{CreatePlan, Plan, PlanCatalog};

const COLUMNS: &str =
    "id, name, description, price, session_count, validity_days, is_active, created_at, updated_at";

fn table(kind: PlanKind) -> &'static str {
    match kind {
        PlanKind::Mat => "plans_mat",
        PlanKind::Reformer => "plans_reformer",
    }
}

pub struct PlanRepo;

impl PlanRepo {
    pub async fn create(
        pool: &PgPool,
        kind: PlanKind,
        input: &CreatePlan,
    ) -> Result<Plan, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name, description, price, session_count, validity_days)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}",
            table(kind)
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.session_count)
            .bind(input.validity_days)
            .fetch_one(pool)
            .await
    }

    /// Find an active plan.
    pub async fn find_active<'e, E>(
        executor: E,
        kind: PlanKind,
        id: DbId,
    ) -> Result<Option<Plan>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1 AND is_active = true",
            table(kind)
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_active(pool: &PgPool, kind: PlanKind) -> Result<Vec<Plan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE is_active = true ORDER BY price, id",
            table(kind)
        );
        sqlx::query_as::<_, Plan>(&query).fetch_all(pool).await
    }

    pub async fn catalog(pool: &PgPool) -> Result<PlanCatalog, sqlx::Error> {
        Ok(PlanCatalog {
            mat: Self::list_active(pool, PlanKind::Mat).await?,
            reformer: Self::list_active(pool, PlanKind::Reformer).await?,
        })
    }
}
