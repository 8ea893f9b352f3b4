//! Repository for the `sessions` table.
//!
//! `spots_available` is only ever changed through [`SessionRepo::take_spot`]
//! and [`SessionRepo::release_spot`], both single conditional statements.

use sqlx::{Executor, PgPool, Postgres};
use studio_core::types::{DbId, Timestamp};

use crate::models::class_session::{
    ClassSession, InstructorSessionSummary, NewClassSession, StudioSessionSummary,
};
use crate::models::status::{BookingStatus, SessionStatus};

const COLUMNS: &str = "id, class_type_id, instructor_id, start_time, end_time, capacity, \
                       spots_available, status_id, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<ClassSession>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, ClassSession>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Scheduled sessions overlapping `[start, end)`, earliest first.
    pub async fn list_overlapping<'e, E>(
        executor: E,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ClassSession>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions \
             WHERE start_time < $2 AND end_time > $1 AND status_id = $3 \
             ORDER BY start_time, id"
        );
        sqlx::query_as::<_, ClassSession>(&query)
            .bind(start)
            .bind(end)
            .bind(SessionStatus::Scheduled.id())
            .fetch_all(executor)
            .await
    }

    /// Insert a session with every spot free.
    ///
    /// Returns `None` when the instructor already has a session starting at
    /// the same instant; the caller should re-read and use that one.
    pub async fn insert_if_absent<'e, E>(
        executor: E,
        input: &NewClassSession,
    ) -> Result<Option<ClassSession>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO sessions
                (class_type_id, instructor_id, start_time, end_time, capacity, spots_available, status_id)
             VALUES ($1, $2, $3, $4, $5, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_sessions_instructor_start DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassSession>(&query)
            .bind(input.class_type_id)
            .bind(input.instructor_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.capacity)
            .bind(SessionStatus::Scheduled.id())
            .fetch_optional(executor)
            .await
    }

    /// Claim one spot. Returns the remaining spots, or `None` if the session
    /// was already full.
    pub async fn take_spot<'e, E>(executor: E, id: DbId) -> Result<Option<i32>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, i32>(
            "UPDATE sessions SET spots_available = spots_available - 1 \
             WHERE id = $1 AND spots_available > 0 \
             RETURNING spots_available",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Free one spot, capped at capacity. Returns `false` if the session is gone.
    pub async fn release_spot<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE sessions SET spots_available = LEAST(spots_available + 1, capacity) \
             WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a session no booking of any status references.
    /// Returns `true` if the row was removed.
    pub async fn delete_if_unreferenced<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM sessions s WHERE s.id = $1 \
             AND NOT EXISTS (SELECT 1 FROM bookings b WHERE b.session_id = s.id)",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// An instructor's sessions starting in `[start, end)` with confirmed head counts.
    ///
    /// With `booked_only`, sessions nobody has booked are left out.
    pub async fn list_for_instructor(
        pool: &PgPool,
        instructor_id: DbId,
        start: Timestamp,
        end: Timestamp,
        booked_only: bool,
    ) -> Result<Vec<InstructorSessionSummary>, sqlx::Error> {
        sqlx::query_as::<_, InstructorSessionSummary>(
            "SELECT s.id, s.class_type_id, ct.name AS class_type_name, s.start_time, s.end_time, \
                    s.capacity, s.spots_available, \
                    COUNT(b.id) FILTER (WHERE b.status_id = $5) AS confirmed_bookings \
             FROM sessions s \
             JOIN class_types ct ON ct.id = s.class_type_id \
             LEFT JOIN bookings b ON b.session_id = s.id \
             WHERE s.instructor_id = $1 AND s.start_time >= $2 AND s.start_time < $3 \
               AND ($4 = false OR s.spots_available < s.capacity) \
             GROUP BY s.id, ct.name \
             ORDER BY s.start_time",
        )
        .bind(instructor_id)
        .bind(start)
        .bind(end)
        .bind(booked_only)
        .bind(BookingStatus::Confirmed.id())
        .fetch_all(pool)
        .await
    }

    /// Every session starting in `[start, end)`, with instructor and attendee names.
    pub async fn list_in_range(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<StudioSessionSummary>, sqlx::Error> {
        sqlx::query_as::<_, StudioSessionSummary>(
            "SELECT s.id, s.class_type_id, ct.name AS class_type_name, s.instructor_id, \
                    i.first_name AS instructor_first_name, i.last_name AS instructor_last_name, \
                    s.start_time, s.end_time, s.capacity, s.spots_available, \
                    COUNT(b.id) FILTER (WHERE b.status_id = $3) AS confirmed_bookings, \
                    COALESCE( \
                        array_agg(concat_ws(' ', c.first_name, c.last_name) ORDER BY b.booking_time) \
                            FILTER (WHERE b.status_id = $3 \
                                    AND (c.first_name IS NOT NULL OR c.last_name IS NOT NULL)), \
                        '{}' \
                    ) AS attendee_names \
             FROM sessions s \
             JOIN class_types ct ON ct.id = s.class_type_id \
             JOIN instructors i ON i.id = s.instructor_id \
             LEFT JOIN bookings b ON b.session_id = s.id \
             LEFT JOIN clients c ON c.id = b.client_id \
             WHERE s.start_time >= $1 AND s.start_time < $2 \
             GROUP BY s.id, ct.name, i.first_name, i.last_name \
             ORDER BY s.start_time",
        )
        .bind(start)
        .bind(end)
        .bind(BookingStatus::Confirmed.id())
        .fetch_all(pool)
        .await
    }
}
