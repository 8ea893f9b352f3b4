//! Repository for the `client_subscriptions` table.

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use studio_core::subscription::SubscriptionDraft;
use studio_core::types::DbId;

use crate::models::status::PaymentStatus;
use crate::models::subscription::ClientSubscription;

const COLUMNS: &str = "id, client_id, plan_mat_id, plan_reformer_id, sessions_total, \
                       classes_remaining, price_paid, is_active, start_date, end_date, \
                       payment_status_id, created_at, updated_at";

/// Active, started and not yet expired on `$2`. Newest purchase wins.
const CURRENT_FILTER: &str = "client_id = $1 AND is_active = true \
                              AND start_date <= $2 AND (end_date IS NULL OR end_date >= $2) \
                              ORDER BY created_at DESC, id DESC LIMIT 1";

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    pub async fn create<'e, E>(
        executor: E,
        client_id: DbId,
        draft: &SubscriptionDraft,
    ) -> Result<ClientSubscription, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO client_subscriptions
                (client_id, plan_mat_id, plan_reformer_id, sessions_total, classes_remaining,
                 price_paid, is_active, start_date, end_date, payment_status_id)
             VALUES ($1, $2, $3, $4, $5, $6, true, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientSubscription>(&query)
            .bind(client_id)
            .bind(draft.plan_mat_id)
            .bind(draft.plan_reformer_id)
            .bind(draft.sessions_total)
            .bind(draft.classes_remaining)
            .bind(draft.price_paid)
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(PaymentStatus::from(draft.payment).id())
            .fetch_one(executor)
            .await
    }

    /// The subscription a booking made on `today` would draw from.
    pub async fn find_current<'e, E>(
        executor: E,
        client_id: DbId,
        today: NaiveDate,
    ) -> Result<Option<ClientSubscription>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("SELECT {COLUMNS} FROM client_subscriptions WHERE {CURRENT_FILTER}");
        sqlx::query_as::<_, ClientSubscription>(&query)
            .bind(client_id)
            .bind(today)
            .fetch_optional(executor)
            .await
    }

    /// Same as [`find_current`](Self::find_current), holding a row lock until
    /// the transaction ends so concurrent bookings draw from it one at a time.
    pub async fn lock_current<'e, E>(
        executor: E,
        client_id: DbId,
        today: NaiveDate,
    ) -> Result<Option<ClientSubscription>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM client_subscriptions WHERE {CURRENT_FILTER} FOR UPDATE"
        );
        sqlx::query_as::<_, ClientSubscription>(&query)
            .bind(client_id)
            .bind(today)
            .fetch_optional(executor)
            .await
    }

    /// Use one class. Returns `false` if the counter was already at zero.
    /// Unlimited subscriptions (NULL counter) are never touched.
    pub async fn use_class<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE client_subscriptions SET classes_remaining = classes_remaining - 1 \
             WHERE id = $1 AND classes_remaining > 0",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Give one class back, never exceeding what was sold.
    pub async fn restore_class<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE client_subscriptions SET classes_remaining = classes_remaining + 1 \
             WHERE id = $1 AND classes_remaining IS NOT NULL \
               AND (sessions_total IS NULL OR classes_remaining < sessions_total)",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
