//! Synchronous client for the Chatwork REST API (v2).
//!
//! # Overview
//! Covers posting messages, creating tasks, reading a message and looking up
//! the token's own account. Every call is one authenticated HTTP request
//! whose JSON response is decoded into a typed struct.
//!
//! # Design
//! - `ChatworkClient` is stateless: it holds the API token and base URL.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), so the I/O boundary is explicit.
//! - `Chatwork` runs build, execute and parse over a `Transport`, by default
//!   a blocking `ureq` agent.
//! - Failures come back as `ApiError`; nothing here exits the process.

pub mod chatwork;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod transport;
pub mod types;

pub use chatwork::Chatwork;
pub use client::{ChatworkClient, DEFAULT_BASE_URL, TOKEN_HEADER};
pub use config::{ApiToken, ChatworkConfig};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    join_user_ids, Account, CreateMessage, CreateMessageResponse, CreateTask, CreateTaskResponse,
    Me, Message, MessageId, RoomId, UserId,
};
