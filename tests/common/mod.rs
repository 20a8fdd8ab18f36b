#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct StoredLink {
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    pub total_clicks: u64,
    pub created_at: String,
}

impl StoredLink {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "shortCode": self.short_code,
            "originalUrl": self.original_url,
            "totalClicks": self.total_clicks,
            "createdAt": self.created_at,
        })
    }

    fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        self.original_url.to_lowercase().contains(&needle)
            || self.short_code.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub links: Vec<StoredLink>,
    pub analytics: HashMap<String, Value>,
    pub users: Vec<(String, String)>,
    pub next_id: u64,
    pub required_token: Option<String>,
    pub fail_list_all: bool,
    pub fail_delete: bool,
    /// Every request as `METHOD path?query`.
    pub requests: Vec<String>,
}

type Shared = Arc<Mutex<BackendState>>;

/// In-process stand-in for the link backend, bound to an ephemeral port.
pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            next_id: 1,
            ..BackendState::default()
        }));

        let app = Router::new()
            .route("/api/urls", get(list_urls).post(create_url))
            .route("/api/urls/{id}", delete(delete_url))
            .route("/api/analytics/{id}", get(analytics))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn seed(&self, id: &str, code: &str, url: &str, clicks: u64) {
        self.state.lock().unwrap().links.push(StoredLink {
            id: id.to_string(),
            short_code: code.to_string(),
            original_url: url.to_string(),
            total_clicks: clicks,
            created_at: "2024-03-01T12:00:00Z".to_string(),
        });
    }

    pub fn set_analytics(&self, id: &str, series: Value) {
        self.state
            .lock()
            .unwrap()
            .analytics
            .insert(id.to_string(), series);
    }

    pub fn add_user(&self, email: &str, password: &str) {
        self.state
            .lock()
            .unwrap()
            .users
            .push((email.to_string(), password.to_string()));
    }

    pub fn require_token(&self, token: &str) {
        self.state.lock().unwrap().required_token = Some(token.to_string());
    }

    pub fn fail_list_all(&self, fail: bool) {
        self.state.lock().unwrap().fail_list_all = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state.lock().unwrap().fail_delete = fail;
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().links.len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }
}

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn authorized(state: &BackendState, headers: &HeaderMap) -> bool {
    let Some(ref token) = state.required_token else {
        return true;
    };
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {token}"))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
    all: Option<bool>,
}

async fn list_urls(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    let mut state = state.lock().unwrap();
    let mut line = "GET /api/urls".to_string();
    if params.all == Some(true) {
        line.push_str("?all=true");
    } else {
        line.push_str(&format!(
            "?page={}&limit={}",
            params.page.unwrap_or(1),
            params.limit.unwrap_or(10)
        ));
        if let Some(ref search) = params.search {
            line.push_str(&format!("&search={search}"));
        }
    }
    state.requests.push(line);

    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, json!({ "message": "Unauthorized" }));
    }

    if params.all == Some(true) {
        if state.fail_list_all {
            return error(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Database unavailable" }),
            );
        }
        let all: Vec<Value> = state.links.iter().map(StoredLink::to_json).collect();
        return Json(Value::Array(all)).into_response();
    }

    let search = params.search.unwrap_or_default();
    let matching: Vec<&StoredLink> = state.links.iter().filter(|l| l.matches(&search)).collect();
    let limit = params.limit.unwrap_or(10).max(1) as usize;
    let page = params.page.unwrap_or(1).max(1) as usize;
    let total_pages = matching.len().div_ceil(limit);
    let items: Vec<Value> = matching
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .map(|l| l.to_json())
        .collect();

    Json(json!({ "items": items, "totalPages": total_pages })).into_response()
}

async fn create_url(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push("POST /api/urls".to_string());
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, json!({ "message": "Unauthorized" }));
    }

    let Some(url) = body["originalUrl"].as_str().filter(|u| u.starts_with("http")) else {
        return error(
            StatusCode::BAD_REQUEST,
            json!({ "message": ["originalUrl must be a URL address"], "statusCode": 400 }),
        );
    };
    let alias = body["customAlias"].as_str().map(str::to_string);
    if let Some(ref alias) = alias
        && state.links.iter().any(|l| &l.short_code == alias)
    {
        return error(StatusCode::CONFLICT, json!({ "message": "Alias already in use" }));
    }

    let id = state.next_id;
    state.next_id += 1;
    let link = StoredLink {
        id: format!("new-{id}"),
        short_code: alias.unwrap_or_else(|| format!("gen{id}")),
        original_url: url.to_string(),
        total_clicks: 0,
        created_at: Utc::now().to_rfc3339(),
    };
    let body = link.to_json();
    state.links.insert(0, link);

    (StatusCode::CREATED, Json(body)).into_response()
}

async fn delete_url(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("DELETE /api/urls/{id}"));
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, json!({ "message": "Unauthorized" }));
    }
    if state.fail_delete {
        return error(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    }

    let before = state.links.len();
    state.links.retain(|l| l.id != id);
    if state.links.len() == before {
        return error(StatusCode::NOT_FOUND, json!({ "message": "URL not found" }));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn analytics(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("GET /api/analytics/{id}"));
    if !authorized(&state, &headers) {
        return error(StatusCode::UNAUTHORIZED, json!({ "message": "Unauthorized" }));
    }
    if !state.links.iter().any(|l| l.id == id) {
        return error(StatusCode::NOT_FOUND, json!({ "message": "URL not found" }));
    }
    Json(state.analytics.get(&id).cloned().unwrap_or_else(|| json!([]))).into_response()
}

#[derive(Debug, Deserialize)]
struct CredentialsBody {
    email: String,
    password: String,
}

fn auth_body(email: &str, index: usize) -> Value {
    json!({
        "accessToken": format!("token-{email}"),
        "user": { "id": format!("user-{index}"), "email": email },
    })
}

async fn login(State(state): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let state = state.lock().unwrap();
    match state
        .users
        .iter()
        .position(|(email, password)| *email == body.email && *password == body.password)
    {
        Some(index) => Json(auth_body(&body.email, index)).into_response(),
        // No message on purpose: clients fall back to their own wording.
        None => error(StatusCode::UNAUTHORIZED, json!({ "statusCode": 401 })),
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let mut state = state.lock().unwrap();
    if state.users.iter().any(|(email, _)| *email == body.email) {
        return error(
            StatusCode::CONFLICT,
            json!({ "message": "Email already registered" }),
        );
    }
    state.users.push((body.email.clone(), body.password));
    let index = state.users.len() - 1;
    (StatusCode::CREATED, Json(auth_body(&body.email, index))).into_response()
}
