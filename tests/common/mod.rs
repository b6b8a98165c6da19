//! Fake Classroom Buddy backend for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use classroom_buddy::config::{ApiConfig, Config, SessionConfig};
use classroom_buddy::session::Session;
use classroom_buddy::AppContext;

pub const VALID_USERNAME: &str = "scholar";
pub const VALID_PASSWORD: &str = "secret1";
pub const VALID_TOKEN: &str = "test-token";
pub const CREATED_MATERIAL_ID: i64 = 42;

/// Subject whose listing never answers in time
pub const SLOW_SUBJECT: &str = "slow";
/// Subject whose listing fails with a bare 500
pub const BROKEN_SUBJECT: &str = "broken";
/// Subject whose listing uses the bare `{content}` shape
pub const LEGACY_SUBJECT: &str = "legacy";

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub subject: String,
    pub file_name: String,
    pub byte_size: usize,
}

#[derive(Default)]
pub struct FakeBackend {
    pub materials: Vec<Value>,
    pub login_hits: AtomicUsize,
    pub register_hits: AtomicUsize,
    pub list_hits: AtomicUsize,
    pub me_hits: AtomicUsize,
    pub upload_hits: AtomicUsize,
    pub last_authorization: Mutex<Option<String>>,
    pub last_size: Mutex<Option<String>>,
    pub uploads: Mutex<Vec<RecordedUpload>>,
}

impl FakeBackend {
    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn record_headers(&self, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        *self.last_authorization.lock().unwrap() = auth;
    }
}

pub struct TestBackend {
    pub addr: SocketAddr,
    pub state: Arc<FakeBackend>,
}

impl TestBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn file_url(&self, name: &str) -> String {
        format!("{}/files/{name}", self.base_url())
    }
}

fn material(id: i64, subject: &str, url: &str, created_at: &str, username: &str) -> Value {
    json!({
        "id": id,
        "subject": subject,
        "url": url,
        "createdAt": created_at,
        "username": username,
    })
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend() -> TestBackend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{addr}");

    let materials = vec![
        material(
            1,
            "computer-science",
            &format!("{base}/files/lecture%20notes.pdf"),
            "2026-02-23T10:00:00Z",
            "alex",
        ),
        material(
            2,
            "computer-science",
            "https://res.cloudinary.com/demo/image/upload/v1700000000/Materials/documents/diagram.png",
            "2026-02-20T08:15:00Z",
            "sarah",
        ),
        material(
            3,
            "mathematics",
            "https://res.cloudinary.com/demo/raw/upload/v1700000001/Materials/documents/calculus.pdf",
            "2026-02-10T12:00:00Z",
            VALID_USERNAME,
        ),
        material(
            4,
            "mathematics",
            "https://res.cloudinary.com/demo/raw/upload/v1700000002/Materials/documents/linear%20algebra%20exam%20prep.docx",
            "2026-01-28T16:45:00Z",
            VALID_USERNAME,
        ),
    ];

    let state = Arc::new(FakeBackend {
        materials,
        ..Default::default()
    });

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/material/me", get(my_materials))
        .route("/api/material/upload", post(upload))
        .route("/api/material/:subject", get(materials_by_subject))
        .route("/files/:name", get(file))
        .with_state(Arc::clone(&state));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend { addr, state }
}

/// An address nothing listens on.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Context against `base_url` with an in-memory session.
pub fn context(base_url: &str) -> Arc<AppContext> {
    let config = Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            page_size: 100,
        },
        session: SessionConfig::default(),
        max_upload_size: 1024 * 1024,
    };
    Arc::new(AppContext::new(config, Session::in_memory()).unwrap())
}

/// Context that already holds a valid token.
pub fn signed_in_context(base_url: &str) -> Arc<AppContext> {
    let ctx = context(base_url);
    ctx.session.sign_in(VALID_TOKEN).unwrap();
    ctx
}

// ============================================================================
// Handlers
// ============================================================================

fn envelope(status: StatusCode, message: &str, data: Value) -> Response {
    (
        status,
        Json(json!({
            "status": status.as_u16(),
            "message": message,
            "data": data,
        })),
    )
        .into_response()
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {VALID_TOKEN}"))
        .unwrap_or(false)
}

/// Listings are public, but a bearer token that is sent must be valid.
fn has_bad_token(headers: &HeaderMap) -> bool {
    headers.contains_key("authorization") && !is_authorized(headers)
}

fn unauthorized() -> Response {
    envelope(
        StatusCode::UNAUTHORIZED,
        "Invalid or expired token",
        Value::Null,
    )
}

async fn login(State(state): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    state.login_hits.fetch_add(1, Ordering::SeqCst);

    if body["username"] == VALID_USERNAME && body["password"] == VALID_PASSWORD {
        envelope(
            StatusCode::OK,
            "Login successful",
            json!({ "token": VALID_TOKEN }),
        )
    } else {
        envelope(
            StatusCode::UNAUTHORIZED,
            "Invalid username or password",
            Value::Null,
        )
    }
}

async fn register(State(state): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    state.register_hits.fetch_add(1, Ordering::SeqCst);

    if body["username"] == "taken" {
        return envelope(
            StatusCode::BAD_REQUEST,
            "Username already exists",
            Value::Null,
        );
    }

    if body["role"] != "ROLE_STUDENT" && body["role"] != "ROLE_TEACHER" {
        return envelope(StatusCode::BAD_REQUEST, "Invalid role", Value::Null);
    }

    envelope(
        StatusCode::CREATED,
        "Student registered successfully",
        json!({ "token": "fresh-token" }),
    )
}

fn page(materials: Vec<Value>, size: usize) -> Value {
    let total = materials.len();
    let content: Vec<Value> = materials.into_iter().take(size).collect();
    json!({
        "content": content,
        "totalElements": total,
        "size": size,
        "number": 0,
    })
}

fn requested_size(params: &HashMap<String, String>) -> usize {
    params
        .get("size")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20)
}

async fn materials_by_subject(
    State(state): State<Arc<FakeBackend>>,
    Path(subject): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    state.record_headers(&headers);
    *state.last_size.lock().unwrap() = params.get("size").cloned();

    if has_bad_token(&headers) {
        return unauthorized();
    }

    match subject.as_str() {
        SLOW_SUBJECT => {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        BROKEN_SUBJECT => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "{}").into_response();
        }
        LEGACY_SUBJECT => {
            return Json(json!({ "content": [], "totalElements": 0 })).into_response();
        }
        _ => {}
    }

    let matching: Vec<Value> = state
        .materials
        .iter()
        .filter(|m| m["subject"] == subject.as_str())
        .cloned()
        .collect();

    envelope(
        StatusCode::OK,
        "Materials retrieved successfully",
        page(matching, requested_size(&params)),
    )
}

async fn my_materials(
    State(state): State<Arc<FakeBackend>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.me_hits.fetch_add(1, Ordering::SeqCst);
    state.record_headers(&headers);

    if !is_authorized(&headers) {
        return unauthorized();
    }

    let mine: Vec<Value> = state
        .materials
        .iter()
        .filter(|m| m["username"] == VALID_USERNAME)
        .cloned()
        .collect();

    envelope(
        StatusCode::OK,
        "Materials retrieved successfully",
        page(mine, requested_size(&params)),
    )
}

async fn upload(
    State(state): State<Arc<FakeBackend>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.upload_hits.fetch_add(1, Ordering::SeqCst);

    if !is_authorized(&headers) {
        return unauthorized();
    }

    let mut subject = None;
    let mut file = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "subject" => subject = field.text().await.ok(),
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.unwrap_or_default();
                file = Some((file_name, data.len()));
            }
            _ => {}
        }
    }

    let (Some(subject), Some((file_name, byte_size))) = (subject, file) else {
        return envelope(
            StatusCode::BAD_REQUEST,
            "subject and file are required",
            Value::Null,
        );
    };

    state.uploads.lock().unwrap().push(RecordedUpload {
        subject,
        file_name,
        byte_size,
    });

    // The backend answers 200 with 201 in the envelope.
    Json(json!({
        "status": 201,
        "message": "Material created successfully",
        "data": CREATED_MATERIAL_ID,
    }))
    .into_response()
}

async fn file(Path(name): Path<String>) -> Response {
    (StatusCode::OK, format!("contents of {name}")).into_response()
}
