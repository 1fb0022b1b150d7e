//! End-to-end guard and flow tests against the assembled router.
//!
//! These drive real HTTP requests (in-process) through the full stack:
//! authentication middleware, role allowlists, handlers, repositories and
//! the in-memory database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use hostal_server::core::{Config, InventoryPolicy, ServerState};
use hostal_server::db::DbService;
use hostal_server::db::models::{PersonCreate, User, UserCreate};
use hostal_server::db::repository::UserRepository;
use hostal_server::{JwtConfig, JwtService, api};
use shared::RoleName;

const SECRET: &str = "integration-test-secret-key-0123456789";
const PASSWORD: &str = "correct-horse-battery";

fn test_config() -> Config {
    Config {
        data_dir: String::new(),
        http_port: 0,
        environment: "test".to_string(),
        log_dir: None,
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            expiration_minutes: 60,
        },
        inventory: InventoryPolicy::default(),
    }
}

async fn test_state() -> ServerState {
    let db = DbService::open_memory().await.unwrap().db;
    let jwt = Arc::new(JwtService::with_config(test_config().jwt.clone()));
    ServerState::new(test_config(), db, jwt)
}

async fn test_app() -> (Router, ServerState) {
    let state = test_state().await;
    (api::build_router(state.clone()), state)
}

/// Seed a user directly through the repository and mint a valid token
/// for it. Returns (user_id, token).
async fn seed_user(state: &ServerState, email: &str, role: RoleName) -> (String, String) {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .save(
            UserCreate {
                email: email.to_string(),
                password_hash: User::hash_password(PASSWORD).unwrap(),
                role,
            },
            PersonCreate {
                first_name: "Test".to_string(),
                last_name: "Staff".to_string(),
                document: "45678912".to_string(),
                phone: "999888777".to_string(),
            },
        )
        .await
        .unwrap();

    let id = user.id.unwrap().to_string();
    let token = state
        .get_jwt_service()
        .generate_token(&id, email, role)
        .unwrap();
    (id, token)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn register_body() -> Value {
    json!({
        "email": "admin@hostal.pe",
        "password": PASSWORD,
        "first_name": "Ana",
        "last_name": "Quispe",
        "document": "12345678",
        "phone": "987654321"
    })
}

// ── Public routes ───────────────────────────────────────────────────

#[tokio::test]
async fn health_is_public() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, request("GET", "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn registration_initializes_the_system_exactly_once() {
    let (app, _) = test_app().await;

    let (status, body) = send(&app, request("GET", "/api/auth/system-status", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["initialized"], false);

    let (status, _) = send(
        &app,
        request("POST", "/api/auth/register", None, Some(register_body())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, request("GET", "/api/auth/system-status", None, None)).await;
    assert_eq!(body["initialized"], true);

    // Second registration is always refused.
    let mut second = register_body();
    second["email"] = json!("other@hostal.pe");
    let (status, body) = send(&app, request("POST", "/api/auth/register", None, Some(second))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "SYSTEM_ALREADY_INITIALIZED");
}

#[tokio::test]
async fn login_returns_token_and_rederived_user() {
    let (app, _) = test_app().await;
    send(
        &app,
        request("POST", "/api/auth/register", None, Some(register_body())),
    )
    .await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "admin@hostal.pe", "password": PASSWORD})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "admin@hostal.pe");
    assert_eq!(body["user"]["role"], "ADMIN");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_inactive_accounts() {
    let (app, state) = test_app().await;
    let (id, _) = seed_user(&state, "recep@hostal.pe", RoleName::Receptionist).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "recep@hostal.pe", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    UserRepository::new(state.get_db())
        .set_active(&id, false)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "recep@hostal.pe", "password": PASSWORD})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "USER_INACTIVE");
}

// ── Guard ───────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, request("GET", "/api/floors", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_invalid() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        &app,
        request("GET", "/api/floors", Some("not-a-real-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[tokio::test]
async fn receptionist_is_forbidden_on_admin_routes() {
    let (app, state) = test_app().await;
    let (_, token) = seed_user(&state, "recep@hostal.pe", RoleName::Receptionist).await;

    // Day-to-day route works
    let (status, _) = send(&app, request("GET", "/api/floors", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);

    // Admin-only route does not
    let (status, body) = send(&app, request("GET", "/api/users", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn stale_role_claim_grants_nothing() {
    // Token claims ADMIN, database says RECEPTIONIST. The database wins.
    let (app, state) = test_app().await;
    let (id, _) = seed_user(&state, "recep@hostal.pe", RoleName::Receptionist).await;

    let forged = state
        .get_jwt_service()
        .generate_token(&id, "recep@hostal.pe", RoleName::Admin)
        .unwrap();

    let (status, body) = send(&app, request("GET", "/api/users", Some(&forged), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn deactivated_account_loses_access_before_token_expiry() {
    let (app, state) = test_app().await;
    let (id, token) = seed_user(&state, "recep@hostal.pe", RoleName::Receptionist).await;

    let (status, _) = send(&app, request("GET", "/api/floors", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);

    UserRepository::new(state.get_db())
        .set_active(&id, false)
        .await
        .unwrap();

    let (status, body) = send(&app, request("GET", "/api/floors", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "USER_INACTIVE");
}

#[tokio::test]
async fn deleted_account_loses_access_before_token_expiry() {
    let (app, state) = test_app().await;
    let (id, token) = seed_user(&state, "recep@hostal.pe", RoleName::Receptionist).await;

    UserRepository::new(state.get_db())
        .soft_delete(&id, 1_700_000_000_000)
        .await
        .unwrap();

    let (status, body) = send(&app, request("GET", "/api/floors", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "USER_DELETED");
}

#[tokio::test]
async fn verify_session_echoes_fresh_identity() {
    let (app, state) = test_app().await;
    let (id, token) = seed_user(&state, "house@hostal.pe", RoleName::Housekeeping).await;

    let (status, body) = send(&app, request("GET", "/api/verify-session", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["role"], "HOUSEKEEPING");
}

// ── Flows ───────────────────────────────────────────────────────────

#[tokio::test]
async fn floor_lifecycle_over_http() {
    let (app, state) = test_app().await;
    let (_, admin) = seed_user(&state, "admin@hostal.pe", RoleName::Admin).await;

    let (status, floor) = send(
        &app,
        request(
            "POST",
            "/api/floors",
            Some(&admin),
            Some(json!({"number": 1, "name": "Piso 1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(floor["number"], 1);

    // Duplicate number is a validation failure with the domain code
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/floors",
            Some(&admin),
            Some(json!({"number": 1, "name": "Piso uno otra vez"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "EL_NUMERO_DE_PISO_YA_EXISTE");

    let (_, floors) = send(&app, request("GET", "/api/floors", Some(&admin), None)).await;
    assert_eq!(floors.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn checkout_flow_over_http() {
    let (app, state) = test_app().await;
    let (_, admin) = seed_user(&state, "admin@hostal.pe", RoleName::Admin).await;

    let (_, category) = send(
        &app,
        request(
            "POST",
            "/api/store/categories",
            Some(&admin),
            Some(json!({"name": "Bebidas"})),
        ),
    )
    .await;
    let (_, unit) = send(
        &app,
        request(
            "POST",
            "/api/store/units",
            Some(&admin),
            Some(json!({"name": "Unidad", "abbreviation": "und"})),
        ),
    )
    .await;

    let (status, product) = send(
        &app,
        request(
            "POST",
            "/api/store/products",
            Some(&admin),
            Some(json!({
                "name": "Inca Kola 500ml",
                "category_id": category["id"],
                "unit_id": unit["id"],
                "purchase_price": 2.0,
                "sale_price": 3.5,
                "initial_stock": 5
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["current_stock"], 5);
    let product_id = product["id"].as_str().unwrap().to_string();

    // Overselling is rejected with the user-facing message, nothing mutates
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/store/sales",
            Some(&admin),
            Some(json!({
                "items": [{"product_id": product_id, "quantity": 6, "unit_price": 3.5}],
                "payment_method": "CASH"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Stock insuficiente para el producto \"Inca Kola 500ml\"."
    );

    // A fitting sale goes through and decrements the cache
    let (status, sale) = send(
        &app,
        request(
            "POST",
            "/api/store/sales",
            Some(&admin),
            Some(json!({
                "items": [{"product_id": product_id, "quantity": 3, "unit_price": 3.5}],
                "payment_method": "CASH"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["total_amount"], 10.5);

    let (_, products) = send(&app, request("GET", "/api/store/products", Some(&admin), None)).await;
    assert_eq!(products[0]["current_stock"], 2);

    // The kardex shows the opening movement plus the sale's OUT movement
    let (_, movements) = send(
        &app,
        request(
            "GET",
            &format!("/api/store/kardex?product_id={product_id}"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(movements.as_array().unwrap().len(), 2);
}
