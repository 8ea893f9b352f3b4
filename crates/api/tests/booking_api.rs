//! End-to-end tests of the booking API: auth, purchase, slots, booking,
//! rescheduling, cancellation and the instructor views.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, days_ahead, get, get_auth, new_client, post_auth, post_json, post_json_auth,
    seed_studio, token, Studio,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use studio_core::roles::{ROLE_ADMIN, ROLE_CLIENT, ROLE_INSTRUCTOR};
use studio_core::types::DbId;

async fn purchase(pool: &PgPool, studio: &Studio, client_token: &str, method: &str) -> Value {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/subscriptions",
        json!({
            "plan_kind": "reformer",
            "plan_id": studio.plan,
            "payment_method": method,
        }),
        client_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn booking_body(studio: &Studio, days: u64, time: &str) -> Value {
    json!({
        "class_type_id": studio.reformer,
        "instructor_id": studio.ana,
        "date": days_ahead(days).to_string(),
        "time": time,
    })
}

async fn book(pool: &PgPool, client_token: &str, body: Value) -> (StatusCode, Value) {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/bookings",
        body,
        client_token,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

fn id_of(value: &Value) -> DbId {
    value.as_i64().expect("expected an integer id")
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_is_public(pool: PgPool) {
    let studio = seed_studio(&pool).await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/class-types").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["name"], "Reformer");

    let response = get(common::build_test_app(pool.clone()), "/api/v1/instructors").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get(common::build_test_app(pool), "/api/v1/plans").await;
    let json = body_json(response).await;
    assert_eq!(id_of(&json["data"]["reformer"][0]["id"]), studio.plan);
    assert!(json["data"]["mat"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_without_token_is_not_authenticated(pool: PgPool) {
    let studio = seed_studio(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/bookings",
        booking_body(&studio, 3, "10:30"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_AUTHENTICATED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_not_authenticated(pool: PgPool) {
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/bookings/upcoming",
        "not-a-jwt",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "NOT_AUTHENTICATED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn instructor_cannot_book(pool: PgPool) {
    let studio = seed_studio(&pool).await;

    let (status, json) = book(
        &pool,
        &token(studio.ana, ROLE_INSTRUCTOR),
        booking_body(&studio, 3, "10:30"),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn card_purchase_becomes_active_subscription(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let client = new_client(&pool).await;
    let client_token = token(client, ROLE_CLIENT);

    let json = purchase(&pool, &studio, &client_token, "card").await;
    assert_eq!(json["data"]["classes_remaining"], 8);
    assert_eq!(id_of(&json["data"]["plan_reformer_id"]), studio.plan);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/subscriptions/active",
        &client_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["sessions_total"], 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_subscription_is_null_without_purchase(pool: PgPool) {
    let client = new_client(&pool).await;

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/subscriptions/active",
        &token(client, ROLE_CLIENT),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_without_subscription_requires_payment(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let client = new_client(&pool).await;

    let (status, json) = book(
        &pool,
        &token(client, ROLE_CLIENT),
        booking_body(&studio, 3, "10:30"),
    )
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json["code"], "NO_ACTIVE_SUBSCRIPTION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_selection_is_rejected(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let client = new_client(&pool).await;
    let client_token = token(client, ROLE_CLIENT);
    purchase(&pool, &studio, &client_token, "cash").await;

    let mut body = booking_body(&studio, 3, "10:30");
    body["class_type_id"] = json!(0);
    let (status, json) = book(&pool, &client_token, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // 10:00 is not a standard slot.
    let (status, json) = book(&pool, &client_token, booking_body(&studio, 3, "10:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_flow_end_to_end(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let client = new_client(&pool).await;
    let client_token = token(client, ROLE_CLIENT);
    purchase(&pool, &studio, &client_token, "cash").await;

    let slots_uri = format!(
        "/api/v1/slots?date={}&class_type_id={}&instructor_id={}",
        days_ahead(3),
        studio.reformer,
        studio.ana
    );

    // Every slot starts out empty.
    let response = get_auth(common::build_test_app(pool.clone()), &slots_uri, &client_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let slots = json["data"].as_array().unwrap();
    assert_eq!(slots.len(), 9);
    assert!(slots.iter().all(|s| s["state"] == "NEW"));

    // Book 10:30; a session is created for it.
    let (status, json) = book(&pool, &client_token, booking_body(&studio, 3, "10:30")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["session_created"], true);
    let booking_id = id_of(&json["data"]["booking"]["id"]);

    // The client now sees the slot as blocked by their own booking.
    let response = get_auth(common::build_test_app(pool.clone()), &slots_uri, &client_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][2]["time"], "10:30");
    assert_eq!(json["data"][2]["state"], "BLOCKED");

    // Booking the same slot again is a duplicate.
    let (status, json) = book(&pool, &client_token, booking_body(&studio, 3, "10:30")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DUPLICATE_BOOKING");

    // The booking shows up in the client's agenda.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/bookings/upcoming",
        &client_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(id_of(&json["data"][0]["booking_id"]), booking_id);
    assert_eq!(json["data"][0]["class_type_name"], "Reformer");
    assert_eq!(json["data"][0]["instructor_first_name"], "Ana");

    // Cancel it.
    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        &client_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Cancelling twice conflicts.
    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/cancel"),
        &client_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_client_sees_open_slot_with_spots(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let first = new_client(&pool).await;
    let first_token = token(first, ROLE_CLIENT);
    purchase(&pool, &studio, &first_token, "cash").await;
    book(&pool, &first_token, booking_body(&studio, 3, "13:00")).await;

    let second = new_client(&pool).await;
    let uri = format!(
        "/api/v1/slots?date={}&class_type_id={}&instructor_id={}",
        days_ahead(3),
        studio.reformer,
        studio.ana
    );
    let response = get_auth(
        common::build_test_app(pool),
        &uri,
        &token(second, ROLE_CLIENT),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["data"][4]["time"], "13:00");
    assert_eq!(json["data"][4]["state"], "OPEN");
    assert_eq!(json["data"][4]["spots_available"], 3);
}

// ---------------------------------------------------------------------------
// Rescheduling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_reschedules_own_booking(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let client = new_client(&pool).await;
    let client_token = token(client, ROLE_CLIENT);
    purchase(&pool, &studio, &client_token, "cash").await;
    let (_, json) = book(&pool, &client_token, booking_body(&studio, 3, "10:30")).await;
    let booking_id = id_of(&json["data"]["booking"]["id"]);
    let old_session = id_of(&json["data"]["booking"]["session_id"]);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{booking_id}/reschedule"),
        json!({ "date": days_ahead(4).to_string(), "time": "15:30" }),
        &client_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["unchanged"], false);
    assert_eq!(json["data"]["session_created"], true);
    assert_eq!(json["data"]["vacated_session_deleted"], true);
    assert_ne!(id_of(&json["data"]["booking"]["session_id"]), old_session);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_client_cannot_reschedule(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let owner = new_client(&pool).await;
    let owner_token = token(owner, ROLE_CLIENT);
    purchase(&pool, &studio, &owner_token, "cash").await;
    let (_, json) = book(&pool, &owner_token, booking_body(&studio, 3, "10:30")).await;
    let booking_id = id_of(&json["data"]["booking"]["id"]);

    let intruder = new_client(&pool).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/reschedule"),
        json!({ "date": days_ahead(4).to_string(), "time": "15:30" }),
        &token(intruder, ROLE_CLIENT),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn instructor_reschedules_on_hourly_template(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let client = new_client(&pool).await;
    let client_token = token(client, ROLE_CLIENT);
    purchase(&pool, &studio, &client_token, "cash").await;
    let (_, json) = book(&pool, &client_token, booking_body(&studio, 3, "10:30")).await;
    let booking_id = id_of(&json["data"]["booking"]["id"]);

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/bookings/{booking_id}/reschedule"),
        json!({
            "date": days_ahead(3).to_string(),
            "time": "20:00",
            "template": "hourly",
        }),
        &token(studio.ana, ROLE_INSTRUCTOR),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["unchanged"], false);
}

// ---------------------------------------------------------------------------
// Instructor views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn instructor_sees_sessions_and_attendees(pool: PgPool) {
    let studio = seed_studio(&pool).await;
    let client = new_client(&pool).await;
    let client_token = token(client, ROLE_CLIENT);
    purchase(&pool, &studio, &client_token, "cash").await;
    let (_, json) = book(&pool, &client_token, booking_body(&studio, 3, "10:30")).await;
    let session_id = id_of(&json["data"]["booking"]["session_id"]);
    let ana_token = token(studio.ana, ROLE_INSTRUCTOR);

    let uri = format!(
        "/api/v1/instructor/sessions?start={}&end={}&booked_only=true",
        days_ahead(0),
        days_ahead(7)
    );
    let response = get_auth(common::build_test_app(pool.clone()), &uri, &ana_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(id_of(&json["data"][0]["id"]), session_id);
    assert_eq!(json["data"][0]["confirmed_bookings"], 1);

    let clients_uri = format!("/api/v1/sessions/{session_id}/clients");
    let response = get_auth(common::build_test_app(pool.clone()), &clients_uri, &ana_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(id_of(&json["data"][0]["client_id"]), client);

    // Another instructor may not read Ana's roster; an admin may.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &clients_uri,
        &token(studio.ioana, ROLE_INSTRUCTOR),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(common::build_test_app(pool), &clients_uri, &token(1, ROLE_ADMIN)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inverted_session_range_is_bad_request(pool: PgPool) {
    let studio = seed_studio(&pool).await;

    let uri = format!(
        "/api/v1/instructor/sessions?start={}&end={}",
        days_ahead(5),
        days_ahead(1)
    );
    let response = get_auth(
        common::build_test_app(pool),
        &uri,
        &token(studio.ana, ROLE_INSTRUCTOR),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_session_attendees_is_not_found(pool: PgPool) {
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/sessions/999999/clients",
        &token(1, ROLE_ADMIN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
