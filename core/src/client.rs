//! Stateless HTTP request builder and response parser for the Chatwork API.
//!
//! # Design
//! `ChatworkClient` holds only the API token and a base URL and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. `Chatwork` glues the two together over a `Transport`;
//! callers that bring their own HTTP stack can use this type directly.

use serde::de::DeserializeOwned;

use crate::config::ApiToken;
use crate::error::{ApiError, ErrorEnvelope};
use crate::form::FormBody;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    join_user_ids, CreateMessage, CreateMessageResponse, CreateTask, CreateTaskResponse, Me,
    Message, MessageId, RoomId,
};

/// Public v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.chatwork.com/v2";

/// Header carrying the API token on every request.
pub const TOKEN_HEADER: &str = "X-ChatWorkToken";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous, stateless client for the Chatwork API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct ChatworkClient {
    token: ApiToken,
    base_url: String,
}

impl ChatworkClient {
    /// Client for the public endpoint.
    pub fn new(token: impl Into<ApiToken>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Client for an alternative endpoint, e.g. a local mock server.
    pub fn with_base_url(token: impl Into<ApiToken>, base_url: &str) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_message(&self, input: &CreateMessage) -> HttpRequest {
        let form = FormBody::new().field("body", input.body.as_str());
        self.post(format!("rooms/{}/messages", input.room_id), form)
    }

    pub fn build_create_task(&self, input: &CreateTask) -> HttpRequest {
        let form = FormBody::new()
            .field("body", input.body.as_str())
            .field("to_ids", join_user_ids(&input.assignees, ","))
            .optional_field("limit", input.due.map(|due| due.timestamp().to_string()));
        self.post(format!("rooms/{}/tasks", input.room_id), form)
    }

    pub fn build_get_message(&self, room_id: RoomId, message_id: &MessageId) -> HttpRequest {
        self.get(format!("rooms/{room_id}/messages/{message_id}"))
    }

    pub fn build_get_me(&self) -> HttpRequest {
        self.get("me".to_string())
    }

    pub fn parse_create_message(&self, response: HttpResponse) -> Result<CreateMessageResponse, ApiError> {
        decode(response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<CreateTaskResponse, ApiError> {
        decode(response)
    }

    pub fn parse_get_message(&self, response: HttpResponse) -> Result<Message, ApiError> {
        decode(response)
    }

    pub fn parse_get_me(&self, response: HttpResponse) -> Result<Me, ApiError> {
        decode(response)
    }

    fn get(&self, endpoint: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(&endpoint),
            headers: vec![self.token_header()],
            body: None,
        }
    }

    fn post(&self, endpoint: String, form: FormBody) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(&endpoint),
            headers: vec![
                ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
                self.token_header(),
            ],
            body: Some(form.encode()),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn token_header(&self) -> (String, String) {
        (TOKEN_HEADER.to_string(), self.token.expose().to_string())
    }
}

/// Check for a 200 and decode the body as `T`.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => Err(ApiError::Api {
            status: response.status,
            errors: envelope.errors,
        }),
        Err(_) => Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}
