//! API integration tests
//!
//! Each test starts a stub inventory backend and the gateway on ephemeral ports and
//! drives the gateway over HTTP.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Multipart;
use chrono::{Duration, Utc};
use reqwest::{
    header::SET_COOKIE,
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde_json::{json, Value};

use inventory_dashboard::{
    api::create_router,
    config::{AppConfig, BackendConfig},
    repository::{BackendClient, Repository},
    services::Services,
    AppState,
};

const TOKEN: &str = "tok-operator";

/// What the stub backend was asked to do
#[derive(Clone, Default)]
struct Stub {
    /// Status updates as (id, status)
    received: Arc<Mutex<Vec<(String, String)>>>,
    /// `page` of every borrow listing request
    borrow_pages: Arc<Mutex<Vec<usize>>>,
    /// Field names of every submitted return form
    return_forms: Arc<Mutex<Vec<Vec<String>>>>,
    /// Item writes as (method, id, body)
    item_writes: Arc<Mutex<Vec<(String, String, Value)>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Invalid token" })),
    )
        .into_response()
}

fn record(id: &str, user: &str, item: &str, status: &str, due_in_days: i64, age_hours: i64) -> Value {
    let now = Utc::now();
    let due = now + Duration::days(due_in_days);
    json!({
        "id": id,
        "userId": user,
        "userName": format!("Mahasiswa {}", user),
        "userEmail": format!("{}@kampus.ac.id", user),
        "userNIM": format!("2100{}", user.len()),
        "itemId": item,
        "borrowDate": (due - Duration::days(7)).to_rfc3339(),
        "returnDate": due.to_rfc3339(),
        "status": status,
        "createdAt": (now - Duration::hours(age_hours)).to_rfc3339(),
    })
}

fn borrow_records() -> Vec<Value> {
    vec![
        record("b2", "u2", "2", "approved", -10, 300),
        record("b3", "u3", "1", "approved", -3, 200),
        record("b4", "u6", "2", "approved", 5, 50),
        record("b5", "u7", "1", "rejected", 2, 20),
        record("b1", "u1", "1", "pending", 7, 1),
    ]
}

fn catalog() -> Vec<Value> {
    vec![
        json!({ "id": 1, "name": "Proyektor Epson", "quantity": 3 }),
        json!({ "id": 2, "name": "Kamera Canon", "quantity": 0 }),
    ]
}

async fn stub_login(Json(body): Json<Value>) -> Response {
    if body["nim"] == "21001" && body["password"] == "rahasia" {
        Json(json!({
            "success": true,
            "message": "Login berhasil",
            "data": { "accessToken": TOKEN, "refreshToken": "tok-refresh" }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn stub_register(Json(body): Json<Value>) -> Response {
    if body["nim"] == "21001" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "message": "NIM already registered" })),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Registration successful", "data": null })),
    )
        .into_response()
}

/// Borrow listing honoring `page` and `limit`
async fn stub_borrows(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let number = |key: &str, default: usize| {
        query
            .get(key)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(default)
            .max(1)
    };
    let page = number("page", 1);
    let limit = number("limit", 10);
    stub.borrow_pages.lock().unwrap().push(page);

    let data: Vec<Value> = borrow_records()
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();
    Json(json!({ "success": true, "data": data })).into_response()
}

async fn stub_returns(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    // Paged shape with fully qualified status values
    Json(json!({
        "success": true,
        "data": {
            "items": [
                record("r1", "u4", "2", "return-rejected", -1, 2),
                record("r2", "u5", "1", "pending", 1, 3),
            ],
            "page": 1
        }
    }))
    .into_response()
}

async fn stub_create_return(
    State(stub): State<Stub>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut fields = Vec::new();
    let mut item_id = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        if name == "itemId" {
            item_id = String::from_utf8_lossy(&bytes).into_owned();
        }
        fields.push(name);
    }
    stub.return_forms.lock().unwrap().push(fields);

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Return request submitted",
            "data": record("r9", "u1", &item_id, "pending", 0, 0)
        })),
    )
        .into_response()
}

async fn stub_items(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "success": true, "data": catalog() })).into_response()
}

async fn stub_create_item(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    stub.item_writes
        .lock()
        .unwrap()
        .push(("POST".into(), String::new(), body.clone()));
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Item created",
            "data": { "id": 3, "name": body["name"], "quantity": body["quantity"] }
        })),
    )
        .into_response()
}

fn item_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Item not found" })),
    )
        .into_response()
}

async fn stub_item(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match catalog().into_iter().find(|item| item["id"].to_string() == id) {
        Some(item) => Json(json!({ "success": true, "data": item })).into_response(),
        None => item_not_found(),
    }
}

async fn stub_update_item(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    stub.item_writes
        .lock()
        .unwrap()
        .push(("PUT".into(), id.clone(), body.clone()));
    Json(json!({
        "success": true,
        "message": "Item updated",
        "data": { "id": id, "name": body["name"], "quantity": body["quantity"] }
    }))
    .into_response()
}

async fn stub_delete_item(State(stub): State<Stub>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    stub.item_writes
        .lock()
        .unwrap()
        .push(("DELETE".into(), id, Value::Null));
    Json(json!({ "success": true, "message": "Item deleted", "data": null })).into_response()
}

async fn stub_status(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let status = body["status"].as_str().unwrap_or_default().to_string();
    stub.received.lock().unwrap().push((id, status));
    Json(json!({ "success": true, "message": "Status updated", "data": null })).into_response()
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

struct TestApp {
    base: String,
    stub: Stub,
    client: Client,
}

impl TestApp {
    async fn start() -> Self {
        Self::with_backend(BackendConfig::default()).await
    }

    /// Start against the stub backend with custom paging settings
    async fn with_backend(backend: BackendConfig) -> Self {
        let stub = Stub::default();
        let router = Router::new()
            .route("/api/v1/auth/login", post(stub_login))
            .route("/api/v1/auth/register", post(stub_register))
            .route("/api/v1/borrow", get(stub_borrows))
            .route("/api/v1/return", get(stub_returns).post(stub_create_return))
            .route("/api/v1/item", get(stub_items).post(stub_create_item))
            .route(
                "/api/v1/item/:id",
                get(stub_item).put(stub_update_item).delete(stub_delete_item),
            )
            .route("/api/v1/borrow/:id/status", post(stub_status))
            .route("/api/v1/return/:id/status", post(stub_status))
            .with_state(stub.clone());
        let backend_url = serve(router).await;

        let config = AppConfig {
            backend: BackendConfig {
                base_url: format!("{}/api/v1", backend_url),
                ..backend
            },
            ..AppConfig::default()
        };
        let client = BackendClient::new(&config.backend).unwrap();
        let services = Services::new(Repository::new(client), &config);
        let state = AppState {
            config: Arc::new(config),
            services: Arc::new(services),
        };
        let base = serve(create_router(state)).await;

        Self {
            base: format!("{}/api", base),
            stub,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn send(&self, request: RequestBuilder) -> (StatusCode, Value) {
        let response = request.bearer_auth(TOKEN).send().await.unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(self.client.post(self.url(path)).json(&body)).await
    }

    async fn post_form(&self, path: &str, form: Form) -> (StatusCode, Value) {
        self.send(self.client.post(self.url(path)).multipart(form)).await
    }

    fn return_forms(&self) -> Vec<Vec<String>> {
        self.stub.return_forms.lock().unwrap().clone()
    }
}

fn ids(rows: &Value, pointer: &str) -> Vec<String> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row.pointer(pointer).and_then(Value::as_str).unwrap().to_string())
        .collect()
}

/// File input left empty by the user
fn empty_file() -> Part {
    Part::bytes(Vec::new()).file_name("")
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::start().await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = TestApp::start().await;

    let response = app.client.get(app.url("/borrow")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Authentication token not found");
}

#[tokio::test]
async fn test_login_sets_session_cookies() {
    let app = TestApp::start().await;

    let response = app
        .client
        .post(app.url("/auth/login"))
        .json(&json!({ "nim": "21001", "password": "rahasia" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies
        .iter()
        .any(|c| c.starts_with(&format!("accessToken={}", TOKEN)) && c.contains("HttpOnly")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=tok-refresh")));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login berhasil");
}

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post("/auth/login", json!({ "nim": "21001", "password": "salah" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_cookie_session_is_accepted() {
    let app = TestApp::start().await;

    let response = app
        .client
        .get(app.url("/borrow"))
        .header("cookie", format!("accessToken={}", TOKEN))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_status_view_hides_completed_and_sorts_by_priority() {
    let app = TestApp::start().await;

    let (status, body) = app.get("/transactions").await;
    assert_eq!(status, StatusCode::OK);
    let rows = &body["data"];
    assert_eq!(ids(rows, "/transaction/id"), ["b1", "r2", "b4", "b3", "b2"]);
    assert_eq!(rows[0]["itemName"], "Proyektor Epson");
    assert!(rows[0]["due"].is_null());
    assert_eq!(rows[4]["due"]["isOverdue"], true);

    let (_, body) = app.get("/transactions?show_completed=true").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_status_view_filters() {
    let app = TestApp::start().await;

    let (_, body) = app.get("/transactions?status=borrow-pending").await;
    assert_eq!(ids(&body["data"], "/transaction/id"), ["b1"]);

    let (_, body) = app.get("/transactions?q=proyektor").await;
    assert_eq!(ids(&body["data"], "/transaction/id"), ["b1", "r2", "b3"]);

    let (status, body) = app.get("/transactions?status=in-progress").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_approve_pending_borrow() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post("/borrow/b1/status", json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Status updated");
    assert_eq!(body["data"]["intent"]["nextStatus"], "borrow-approved");
    assert_eq!(body["data"]["transaction"]["status"], "borrow-approved");

    let received = app.stub.received.lock().unwrap().clone();
    assert_eq!(received, [("b1".to_string(), "approved".to_string())]);
}

#[tokio::test]
async fn test_illegal_transition_is_not_forwarded() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post("/borrow/b2/status", json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "InvalidTransition");

    let (status, _) = app
        .post("/return/r1/status", json!({ "status": "rejected" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .post("/borrow/b1/status", json!({ "status": "complete" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Valid status is required (approved or rejected)");

    let (status, _) = app
        .post("/borrow/nope/status", json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(app.stub.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sanctions_order_and_resolution() {
    let app = TestApp::start().await;

    let (status, body) = app.get("/sanctions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"], "/transaction/id"), ["b2", "b3", "r1"]);
    assert_eq!(body["data"][0]["reason"], "overdue");
    assert_eq!(body["data"][2]["reason"], "return-rejected");
    assert_eq!(body["data"][2]["itemName"], "Kamera Canon");

    let (status, body) = app.post("/sanctions/r1/resolve", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["transaction"]["id"], "r1");

    let (_, body) = app.get("/sanctions").await;
    assert_eq!(ids(&body["data"], "/transaction/id"), ["b2", "b3"]);

    let (status, _) = app.post("/sanctions/b4/resolve", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let app = TestApp::start().await;

    let (status, body) = app.get("/dashboard/summary").await;
    assert_eq!(status, StatusCode::OK);

    let summary = &body["data"];
    assert_eq!(summary["pendingBorrows"], 1);
    assert_eq!(summary["pendingReturns"], 1);
    assert_eq!(summary["activeBorrows"], 3);
    assert_eq!(summary["overdue"], 2);
    assert_eq!(summary["sanctions"], 3);
    assert_eq!(summary["totalItems"], 2);
    assert_eq!(summary["availableQuantity"], 3);
}

#[tokio::test]
async fn test_logout_expires_cookies() {
    let app = TestApp::start().await;

    let response = app.client.post(app.url("/auth/logout")).send().await.unwrap();
    assert!(response.status().is_success());

    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logout successful");
}

#[tokio::test]
async fn test_login_with_missing_field_is_a_bad_request() {
    let app = TestApp::start().await;

    let (status, body) = app.post("/auth/login", json!({ "nim": "21001" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "NIM and password are required");
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = TestApp::start().await;

    let (status, body) = app
        .send(
            app.client
                .post(app.url("/auth/login"))
                .header("content-type", "application/json")
                .body("{\"nim\": "),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));

    let (status, body) = app.post("/items", json!({ "name": "Tripod", "quantity": "banyak" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "name": "Siti", "email": "siti@kampus.ac.id", "nim": "21002", "password": "rahasia" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration successful");

    let (status, body) = app
        .post("/auth/register", json!({ "name": "Siti", "nim": "21002", "password": "rahasia" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "name": "Budi", "email": "budi@kampus.ac.id", "nim": "21001", "password": "rahasia" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "NIM already registered");
}

#[tokio::test]
async fn test_lookups_page_through_the_backend() {
    let app = TestApp::with_backend(BackendConfig {
        borrow_page_limit: 2,
        ..BackendConfig::default()
    })
    .await;

    // b1 is the only record on the third page
    let (status, body) = app
        .post("/borrow/b1/status", json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["transaction"]["status"], "borrow-approved");
    assert_eq!(*app.stub.borrow_pages.lock().unwrap(), [1, 2, 3]);

    let (_, body) = app.get("/transactions").await;
    assert_eq!(ids(&body["data"], "/transaction/id"), ["b1", "r2", "b4", "b3", "b2"]);

    let (_, body) = app.get("/dashboard/summary").await;
    assert_eq!(body["data"]["pendingBorrows"], 1);
    assert_eq!(body["data"]["activeBorrows"], 3);
}

#[tokio::test]
async fn test_submit_return_with_empty_damage_part() {
    let app = TestApp::start().await;

    let form = Form::new()
        .text("itemId", "1")
        .text("borrowDate", "2025-06-01")
        .text("returnDate", "2025-06-08")
        .part("damagedItem", empty_file());
    let (status, body) = app.post_form("/return", form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Return request submitted");
    assert_eq!(body["data"]["status"], "return-pending");
    assert_eq!(body["data"]["itemId"], "1");

    assert_eq!(app.return_forms(), [["itemId", "borrowDate", "returnDate"]]);
}

#[tokio::test]
async fn test_submit_return_forwards_damage_report() {
    let app = TestApp::start().await;

    let photo = Part::bytes(b"\xff\xd8\xff\xe0retak".to_vec())
        .file_name("retak.jpg")
        .mime_str("image/jpeg")
        .unwrap();
    let form = Form::new()
        .text("itemId", "2")
        .text("borrowDate", "2025-06-01T08:00:00Z")
        .text("returnDate", "2025-06-08")
        .part("damagedItem", photo);
    let (status, _) = app.post_form("/return", form).await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(
        app.return_forms(),
        [["itemId", "borrowDate", "returnDate", "damagedItem"]]
    );
}

#[tokio::test]
async fn test_invalid_return_form_is_not_forwarded() {
    let app = TestApp::start().await;

    let form = Form::new()
        .text("borrowDate", "2025-06-01")
        .text("returnDate", "2025-06-08");
    let (status, body) = app.post_form("/return", form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "itemId, borrowDate, and returnDate are required");

    let form = Form::new()
        .text("itemId", "1")
        .text("borrowDate", "2025-06-08")
        .text("returnDate", "2025-06-01");
    let (status, body) = app.post_form("/return", form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "returnDate cannot be before borrowDate");

    assert!(app.return_forms().is_empty());
}

#[tokio::test]
async fn test_return_of_approved_borrow() {
    let app = TestApp::start().await;

    let form = Form::new().part("damagedItem", empty_file());
    let (status, body) = app.post_form("/borrow/b2/return", form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["itemId"], "2");
    assert_eq!(app.return_forms(), [["itemId", "borrowDate", "returnDate"]]);

    let form = Form::new().part("damagedItem", empty_file());
    let (status, _) = app.post_form("/borrow/b1/return", form).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let form = Form::new().part("damagedItem", empty_file());
    let (status, _) = app.post_form("/borrow/nope/return", form).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(app.return_forms().len(), 1);
}

#[tokio::test]
async fn test_item_crud() {
    let app = TestApp::start().await;

    let (status, body) = app.get("/items?q=kamera").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"], "/id"), ["2"]);

    let (status, body) = app.get("/items/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Proyektor Epson");

    let (status, body) = app.get("/items/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found");

    let (status, body) = app
        .post("/items", json!({ "name": "Tripod Manfrotto", "quantity": 4 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Item created");
    assert_eq!(body["data"]["id"], "3");

    let (status, body) = app
        .post("/items", json!({ "name": "Tripod Manfrotto", "quantity": -2 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Quantity cannot be negative");

    let (status, body) = app
        .send(
            app.client
                .put(app.url("/items/1"))
                .json(&json!({ "name": "Proyektor Epson EB-X06", "quantity": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Proyektor Epson EB-X06");

    let (status, body) = app.send(app.client.delete(app.url("/items/2"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted");

    let writes = app.stub.item_writes.lock().unwrap().clone();
    let calls: Vec<(&str, &str)> = writes
        .iter()
        .map(|(method, id, _)| (method.as_str(), id.as_str()))
        .collect();
    assert_eq!(calls, [("POST", ""), ("PUT", "1"), ("DELETE", "2")]);
    assert_eq!(writes[0].2["quantity"], 4);
}

#[tokio::test]
async fn test_bulk_sanction_resolution() {
    let app = TestApp::start().await;

    let (status, body) = app
        .post("/sanctions/resolve", json!({ "ids": ["r1", "b4", "b2", "r1"] }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]["resolved"], "/transaction/id"), ["r1", "b2"]);
    assert_eq!(body["data"]["notFound"], json!(["b4"]));

    let (_, body) = app.get("/sanctions").await;
    assert_eq!(ids(&body["data"], "/transaction/id"), ["b3"]);

    let (status, body) = app.post("/sanctions/resolve", json!({ "ids": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ids must not be empty");
}
