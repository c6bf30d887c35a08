//! Blocking handle that runs each operation end to end.

use tracing::{debug, warn};

use crate::client::ChatworkClient;
use crate::config::{ApiToken, ChatworkConfig};
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    CreateMessage, CreateMessageResponse, CreateTask, CreateTaskResponse, Me, Message, MessageId,
    RoomId,
};

/// A Chatwork account bound to one API token.
///
/// Every method performs exactly one HTTP request on the calling thread.
pub struct Chatwork<T = UreqTransport> {
    client: ChatworkClient,
    transport: T,
}

impl Chatwork<UreqTransport> {
    pub fn new(token: impl Into<ApiToken>) -> Self {
        Self::with_transport(ChatworkClient::new(token), UreqTransport::new())
    }

    pub fn from_config(config: ChatworkConfig) -> Self {
        let client = ChatworkClient::with_base_url(config.api_token, &config.base_url);
        Self::with_transport(client, UreqTransport::new())
    }

    /// Build from `CHATWORK_API_TOKEN` / `CHATWORK_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        ChatworkConfig::from_env().map(Self::from_config)
    }
}

impl<T: Transport> Chatwork<T> {
    pub fn with_transport(client: ChatworkClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ChatworkClient {
        &self.client
    }

    /// Post `body` into `room_id`.
    pub fn create_message(&self, input: &CreateMessage) -> Result<CreateMessageResponse, ApiError> {
        let response = self.send(self.client.build_create_message(input))?;
        self.client.parse_create_message(response)
    }

    /// Create one task per assignee. Returns the ids in assignee order.
    pub fn create_task(&self, input: &CreateTask) -> Result<CreateTaskResponse, ApiError> {
        let response = self.send(self.client.build_create_task(input))?;
        self.client.parse_create_task(response)
    }

    pub fn get_message(&self, room_id: RoomId, message_id: &MessageId) -> Result<Message, ApiError> {
        let response = self.send(self.client.build_get_message(room_id, message_id))?;
        self.client.parse_get_message(response)
    }

    /// Profile of the token's owner.
    pub fn get_me(&self) -> Result<Me, ApiError> {
        let response = self.send(self.client.build_get_me())?;
        self.client.parse_get_me(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        debug!(method, url = %url, "sending chatwork request");

        match self.transport.execute(request) {
            Ok(response) => {
                debug!(method, url = %url, status = response.status, "chatwork response");
                Ok(response)
            }
            Err(e) => {
                warn!(method, url = %url, error = %e, "chatwork request failed");
                Err(e)
            }
        }
    }
}
