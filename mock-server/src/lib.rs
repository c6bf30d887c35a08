//! In-memory stand-in for the Chatwork v2 endpoints the client covers.
//!
//! Every route checks `X-ChatWorkToken` against the token the router was
//! built with. Rejections use Chatwork's `{"errors": [...]}` body.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const TOKEN_HEADER: &str = "x-chatworktoken";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub name: String,
    pub avatar_image_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub account: Account,
    pub body: String,
    pub send_time: i64,
    pub update_time: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Me {
    pub account_id: i64,
    pub room_id: i64,
    pub name: String,
    pub chatwork_id: String,
    pub organization_id: i64,
    pub organization_name: String,
    pub department: String,
    pub title: String,
    pub url: String,
    pub introduction: String,
    pub mail: String,
    pub tel_organization: String,
    pub tel_extension: String,
    pub tel_mobile: String,
    pub skype: String,
    pub facebook: String,
    pub twitter: String,
    pub avatar_image_url: String,
}

impl Me {
    /// The account every mock token belongs to.
    pub fn sample() -> Self {
        Me {
            account_id: 123,
            room_id: 322,
            name: "John Smith".to_string(),
            chatwork_id: "tarochatworkid".to_string(),
            organization_id: 101,
            organization_name: "Hello Company".to_string(),
            department: "Marketing".to_string(),
            title: "CMO".to_string(),
            url: "http://mycompany.example.com".to_string(),
            introduction: "Self Introduction".to_string(),
            mail: "taro@example.com".to_string(),
            tel_organization: "XXX-XXXX-XXXX".to_string(),
            tel_extension: "YYY-YYYY-YYYY".to_string(),
            tel_mobile: "ZZZ-ZZZZ-ZZZZ".to_string(),
            skype: "myskype_id".to_string(),
            facebook: "myfacebook_id".to_string(),
            twitter: "mytwitter_id".to_string(),
            avatar_image_url: "https://example.com/abc.png".to_string(),
        }
    }

    fn account(&self) -> Account {
        Account {
            account_id: self.account_id,
            name: self.name.clone(),
            avatar_image_url: self.avatar_image_url.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreateMessageForm {
    pub body: String,
}

#[derive(Deserialize)]
pub struct CreateTaskForm {
    pub body: String,
    pub to_ids: String,
    pub limit: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CreateMessageResponse {
    pub message_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub task_ids: Vec<i64>,
}

/// A stored task. Kept so `limit` parsing has somewhere to land.
#[derive(Clone, Debug)]
pub struct Task {
    pub task_id: i64,
    pub room_id: i64,
    pub assignee: i64,
    pub body: String,
    pub limit_time: i64,
}

#[derive(Default)]
pub struct Store {
    next_message_id: u64,
    next_task_id: i64,
    messages: HashMap<(i64, String), Message>,
    tasks: Vec<Task>,
}

impl Store {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    me: Arc<Me>,
    store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::from(token),
            me: Arc::new(Me::sample()),
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    pub fn store(&self) -> &RwLock<Store> {
        &self.store
    }
}

/// A rejected request, rendered as Chatwork's error envelope.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    errors: Vec<String>,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            errors: vec![message.into()],
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { errors: self.errors })).into_response()
    }
}

pub fn app(token: &str) -> Router {
    router(AppState::new(token))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v2/me", get(get_me))
        .route("/v2/rooms/{room_id}/messages", post(create_message))
        .route("/v2/rooms/{room_id}/messages/{message_id}", get(get_message))
        .route("/v2/rooms/{room_id}/tasks", post(create_task))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiFailure> {
    match headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) if token == &*state.token => Ok(()),
        _ => Err(ApiFailure::new(StatusCode::UNAUTHORIZED, "Invalid API token")),
    }
}

fn bad_form(rejection: FormRejection) -> ApiFailure {
    ApiFailure::new(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn parse_to_ids(raw: &str) -> Result<Vec<i64>, ApiFailure> {
    let ids: Result<Vec<i64>, _> = raw.split(',').map(|s| s.trim().parse::<i64>()).collect();
    match ids {
        Ok(ids) if !ids.is_empty() => Ok(ids),
        _ => Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "Invalid Parameter to_ids",
        )),
    }
}

async fn get_me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Me>, ApiFailure> {
    authorize(&state, &headers)?;
    Ok(Json((*state.me).clone()))
}

async fn create_message(
    State(state): State<AppState>,
    Path(room_id): Path<i64>,
    headers: HeaderMap,
    form: Result<Form<CreateMessageForm>, FormRejection>,
) -> Result<Json<CreateMessageResponse>, ApiFailure> {
    authorize(&state, &headers)?;
    let Form(input) = form.map_err(bad_form)?;
    if input.body.trim().is_empty() {
        return Err(ApiFailure::new(StatusCode::BAD_REQUEST, "Parameter body is required"));
    }

    let mut store = state.store.write().await;
    store.next_message_id += 1;
    let message_id = store.next_message_id.to_string();
    let message = Message {
        message_id: message_id.clone(),
        account: state.me.account(),
        body: input.body,
        send_time: now(),
        update_time: 0,
    };
    store.messages.insert((room_id, message_id.clone()), message);
    debug!(room_id, message_id = %message_id, "stored message");

    Ok(Json(CreateMessageResponse { message_id }))
}

async fn get_message(
    State(state): State<AppState>,
    Path((room_id, message_id)): Path<(i64, String)>,
    headers: HeaderMap,
) -> Result<Json<Message>, ApiFailure> {
    authorize(&state, &headers)?;
    let store = state.store.read().await;
    store
        .messages
        .get(&(room_id, message_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::new(StatusCode::NOT_FOUND, "Message not found"))
}

async fn create_task(
    State(state): State<AppState>,
    Path(room_id): Path<i64>,
    headers: HeaderMap,
    form: Result<Form<CreateTaskForm>, FormRejection>,
) -> Result<Json<CreateTaskResponse>, ApiFailure> {
    authorize(&state, &headers)?;
    let Form(input) = form.map_err(bad_form)?;
    if input.body.trim().is_empty() {
        return Err(ApiFailure::new(StatusCode::BAD_REQUEST, "Parameter body is required"));
    }
    let assignees = parse_to_ids(&input.to_ids)?;
    let limit_time = match input.limit.as_deref() {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| ApiFailure::new(StatusCode::BAD_REQUEST, "Invalid Parameter limit"))?,
    };

    let mut store = state.store.write().await;
    let mut task_ids = Vec::with_capacity(assignees.len());
    for assignee in assignees {
        store.next_task_id += 1;
        let task_id = store.next_task_id;
        store.tasks.push(Task {
            task_id,
            room_id,
            assignee,
            body: input.body.clone(),
            limit_time,
        });
        task_ids.push(task_id);
    }
    debug!(room_id, count = task_ids.len(), "stored tasks");

    Ok(Json(CreateTaskResponse { task_ids }))
}
