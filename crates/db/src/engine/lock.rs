//! Per-day materialization locks.

use chrono::{Datelike, NaiveDate};
use sqlx::PgConnection;

/// First key of the two-key advisory lock space, reserved for studio days.
const DAY_LOCK_CLASS: i32 = 0x5354_4459;

/// Take transaction-scoped advisory locks on studio-local days.
///
/// Locks are taken in ascending day order so two transactions touching the
/// same pair of days cannot deadlock. They release on commit or rollback.
pub(crate) async fn lock_days(
    conn: &mut PgConnection,
    days: &[NaiveDate],
) -> Result<(), sqlx::Error> {
    let mut keys: Vec<i32> = days.iter().map(|d| d.num_days_from_ce()).collect();
    keys.sort_unstable();
    keys.dedup();

    for key in keys {
        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(DAY_LOCK_CLASS)
            .bind(key)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
