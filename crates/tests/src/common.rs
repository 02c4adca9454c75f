use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use client::PollsClient;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::ApiSettings;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the polls backend.
///
/// Serves the same routes under `/api/v1` and records every list request so
/// tests can assert on the `(skip, limit)` window that was sent.
#[derive(Default)]
pub struct MockBackend {
    polls: Mutex<Vec<Value>>,
    next_id: Mutex<i64>,
    list_requests: Mutex<Vec<(usize, usize)>>,
    last_authorization: Mutex<Option<String>>,
    fail_list: AtomicBool,
}

impl MockBackend {
    /// Every `(skip, limit)` pair the list endpoint has received, in order.
    pub fn list_requests(&self) -> Vec<(usize, usize)> {
        self.list_requests.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }

    /// Make the list endpoint answer 500 until switched back.
    pub fn set_list_failing(&self, failing: bool) {
        self.fail_list.store(failing, Ordering::SeqCst);
    }

    pub fn poll_count(&self) -> usize {
        self.polls.lock().unwrap().len()
    }

    fn insert(&self, title: &str, description: Option<&str>) -> Value {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let poll = json!({
            "id": *next_id,
            "title": title,
            "description": description,
            "owner_id": "00000000-0000-0000-0000-000000000001",
        });
        self.polls.lock().unwrap().push(poll.clone());
        poll
    }
}

/// Start a mock backend seeded with `seed` polls titled "Poll 1".."Poll N".
/// Every third poll has no description.
pub async fn spawn_backend(seed: usize) -> (PollsClient, Arc<MockBackend>) {
    spawn_backend_with(seed, ApiSettings::default()).await
}

/// Like [`spawn_backend`], with custom client settings. `base_url` is
/// replaced by the mock's address.
pub async fn spawn_backend_with(
    seed: usize,
    settings: ApiSettings,
) -> (PollsClient, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::default());
    for n in 1..=seed {
        let description = format!("Description {n}");
        let description = (n % 3 != 0).then_some(description.as_str());
        backend.insert(&format!("Poll {n}"), description);
    }

    let polls = Router::new()
        .route("/polls/", get(list_polls).post(create_poll))
        .route(
            "/polls/{id}",
            get(read_poll).put(update_poll).delete(delete_poll),
        );
    let app = Router::new()
        .nest("/api/v1", polls)
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend crashed");
    });

    let settings = ApiSettings {
        base_url: format!("http://{addr}/api/v1"),
        ..settings
    };
    let client = PollsClient::new(&settings).expect("Failed to build client");
    (client, backend)
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable_client() -> PollsClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);

    let settings = ApiSettings {
        base_url: format!("http://{addr}/api/v1"),
        timeout_secs: 5,
        ..ApiSettings::default()
    };
    PollsClient::new(&settings).expect("Failed to build client")
}

type Reply = (StatusCode, Json<Value>);

fn not_found() -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Poll not found" })),
    )
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

async fn list_polls(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Reply {
    backend
        .list_requests
        .lock()
        .unwrap()
        .push((params.skip, params.limit));
    *backend.last_authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if backend.fail_list.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Database unavailable" })),
        );
    }

    let polls = backend.polls.lock().unwrap();
    let data: Vec<Value> = polls
        .iter()
        .skip(params.skip)
        .take(params.limit)
        .cloned()
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "data": data, "count": polls.len() })),
    )
}

async fn create_poll(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Reply {
    let title = body
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    if title.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [{
                    "loc": ["body", "title"],
                    "msg": "String should have at least 1 character",
                    "type": "string_too_short",
                }]
            })),
        );
    }
    let description = body.get("description").and_then(Value::as_str);
    (StatusCode::OK, Json(backend.insert(&title, description)))
}

fn find(backend: &MockBackend, id: i64) -> Option<usize> {
    backend
        .polls
        .lock()
        .unwrap()
        .iter()
        .position(|p| p["id"] == json!(id))
}

async fn read_poll(State(backend): State<Arc<MockBackend>>, Path(id): Path<i64>) -> Reply {
    match find(&backend, id) {
        Some(idx) => (StatusCode::OK, Json(backend.polls.lock().unwrap()[idx].clone())),
        None => not_found(),
    }
}

async fn update_poll(
    State(backend): State<Arc<MockBackend>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let Some(idx) = find(&backend, id) else {
        return not_found();
    };
    let mut polls = backend.polls.lock().unwrap();
    let poll = &mut polls[idx];
    for field in ["title", "description"] {
        if let Some(value) = body.get(field) {
            poll[field] = value.clone();
        }
    }
    (StatusCode::OK, Json(poll.clone()))
}

async fn delete_poll(State(backend): State<Arc<MockBackend>>, Path(id): Path<i64>) -> Reply {
    let Some(idx) = find(&backend, id) else {
        return not_found();
    };
    backend.polls.lock().unwrap().remove(idx);
    (
        StatusCode::OK,
        Json(json!({ "message": "Poll deleted successfully" })),
    )
}
