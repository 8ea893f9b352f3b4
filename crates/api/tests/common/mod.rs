#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Days, NaiveDate, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use studio_api::app::build_app;
use studio_api::auth::jwt::JwtConfig;
use studio_api::config::ServerConfig;
use studio_core::policy::BookingPolicy;
use studio_core::roles::Actor;
use studio_core::slots::local_date;
use studio_core::subscription::PlanKind;
use studio_core::types::DbId;
use studio_db::models::class_type::CreateClassType;
use studio_db::models::instructor::CreateInstructor;
use studio_db::models::plan::CreatePlan;
use studio_db::repositories::{ClassTypeRepo, ClientRepo, InstructorRepo, PlanRepo};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        policy: BookingPolicy::default(),
    }
}

/// Build the full application router, including every middleware layer.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, test_config())
}

/// A valid access token for `subject` in `role`.
pub fn token(subject: DbId, role: &str) -> String {
    let actor = Actor::from_role(role, subject).unwrap();
    test_config().jwt.issue(actor).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of the fixtures every booking test needs.
pub struct Studio {
    pub reformer: DbId,
    pub ana: DbId,
    pub ioana: DbId,
    pub plan: DbId,
}

pub async fn seed_studio(pool: &PgPool) -> Studio {
    let reformer = ClassTypeRepo::create(
        pool,
        &CreateClassType {
            name: "Reformer".to_string(),
            description: None,
            default_duration_minutes: None,
            level: None,
            color_code: None,
        },
    )
    .await
    .unwrap();
    let instructor = |first: &str| CreateInstructor {
        first_name: first.to_string(),
        last_name: "Popescu".to_string(),
        email: None,
        phone: None,
        bio: None,
        specializations: vec!["reformer".to_string()],
    };
    let ana = InstructorRepo::create(pool, &instructor("Ana")).await.unwrap();
    let ioana = InstructorRepo::create(pool, &instructor("Ioana")).await.unwrap();
    let plan = PlanRepo::create(
        pool,
        PlanKind::Reformer,
        &CreatePlan {
            name: "8 classes".to_string(),
            description: None,
            price: 600.0,
            session_count: Some(8),
            validity_days: Some(30),
        },
    )
    .await
    .unwrap();

    Studio {
        reformer: reformer.id,
        ana: ana.id,
        ioana: ioana.id,
        plan: plan.id,
    }
}

/// Register a fresh token subject as a client with no profile yet.
pub async fn new_client(pool: &PgPool) -> DbId {
    let (id,): (DbId,) = sqlx::query_as("SELECT COALESCE(MAX(id), 0) + 1 FROM clients")
        .fetch_one(pool)
        .await
        .unwrap();
    ClientRepo::ensure_exists(pool, id).await.unwrap();
    id
}

/// Studio-local date `days` from today.
pub fn days_ahead(days: u64) -> NaiveDate {
    local_date(Utc::now(), BookingPolicy::default().timezone) + Days::new(days)
}
