//! Repository for the `bookings` table.

use sqlx::{Executor, FromRow, PgPool, Postgres};
use studio_core::availability::BookedInterval;
use studio_core::types::{DbId, Timestamp};

use crate::models::booking::{Booking, SessionAttendee, UpcomingBooking};
use crate::models::status::BookingStatus;

const COLUMNS: &str = "id, client_id, session_id, client_subscription_id, booking_time, \
                       status_id, created_at, updated_at";

#[derive(FromRow)]
struct BookedRow {
    session_id: DbId,
    start_time: Timestamp,
    end_time: Timestamp,
}

pub struct BookingRepo;

impl BookingRepo {
    /// Insert a confirmed booking stamped with the current time.
    pub async fn insert_confirmed<'e, E>(
        executor: E,
        client_id: DbId,
        session_id: DbId,
        client_subscription_id: DbId,
    ) -> Result<Booking, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO bookings (client_id, session_id, client_subscription_id, booking_time, status_id)
             VALUES ($1, $2, $3, NOW(), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(client_id)
            .bind(session_id)
            .bind(client_subscription_id)
            .bind(BookingStatus::Confirmed.id())
            .fetch_one(executor)
            .await
    }

    /// Read a booking and hold its row lock until the transaction ends.
    pub async fn lock_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Booking>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn move_to_session<'e, E>(
        executor: E,
        id: DbId,
        session_id: DbId,
    ) -> Result<Booking, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("UPDATE bookings SET session_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(session_id)
            .fetch_one(executor)
            .await
    }

    pub async fn set_status<'e, E>(
        executor: E,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("UPDATE bookings SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status.id())
            .fetch_one(executor)
            .await
    }

    /// Time windows of a client's confirmed bookings overlapping `[start, end)`.
    pub async fn confirmed_intervals<'e, E>(
        executor: E,
        client_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<BookedInterval>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, BookedRow>(
            "SELECT b.session_id, s.start_time, s.end_time \
             FROM bookings b JOIN sessions s ON s.id = b.session_id \
             WHERE b.client_id = $1 AND b.status_id = $4 \
               AND s.start_time < $3 AND s.end_time > $2",
        )
        .bind(client_id)
        .bind(start)
        .bind(end)
        .bind(BookingStatus::Confirmed.id())
        .fetch_all(executor)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| BookedInterval {
                session_id: r.session_id,
                start_time: r.start_time,
                end_time: r.end_time,
            })
            .collect())
    }

    /// Confirmed bookings of a client whose session starts after `now`.
    pub async fn list_upcoming_for_client(
        pool: &PgPool,
        client_id: DbId,
        now: Timestamp,
    ) -> Result<Vec<UpcomingBooking>, sqlx::Error> {
        sqlx::query_as::<_, UpcomingBooking>(
            "SELECT b.id AS booking_id, s.id AS session_id, s.start_time, s.end_time, \
                    ct.id AS class_type_id, ct.name AS class_type_name, \
                    i.id AS instructor_id, i.first_name AS instructor_first_name, \
                    i.last_name AS instructor_last_name \
             FROM bookings b \
             JOIN sessions s ON s.id = b.session_id \
             JOIN class_types ct ON ct.id = s.class_type_id \
             JOIN instructors i ON i.id = s.instructor_id \
             WHERE b.client_id = $1 AND b.status_id = $2 AND s.start_time > $3 \
             ORDER BY s.start_time",
        )
        .bind(client_id)
        .bind(BookingStatus::Confirmed.id())
        .bind(now)
        .fetch_all(pool)
        .await
    }

    /// Clients holding a confirmed booking in a session, in booking order.
    pub async fn list_attendees(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<SessionAttendee>, sqlx::Error> {
        sqlx::query_as::<_, SessionAttendee>(
            "SELECT b.id AS booking_id, c.id AS client_id, c.first_name, c.last_name, \
                    c.email, c.phone, b.booking_time \
             FROM bookings b JOIN clients c ON c.id = b.client_id \
             WHERE b.session_id = $1 AND b.status_id = $2 \
             ORDER BY b.booking_time, b.id",
        )
        .bind(session_id)
        .bind(BookingStatus::Confirmed.id())
        .fetch_all(pool)
        .await
    }
}
