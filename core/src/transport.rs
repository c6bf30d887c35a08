//! Executes `HttpRequest` values over the network.
//!
//! `ChatworkClient` never does I/O itself; a `Transport` sits between its
//! `build_*` and `parse_*` halves. `UreqTransport` is the blocking default.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// One blocking HTTP round-trip.
///
/// Implementations return non-2xx responses as data so status handling stays
/// in the client's parse methods. Only failures to get a response at all are
/// errors.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let transport_err = |e: ureq::Error| ApiError::Transport(e.to_string());

        let mut response = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(request.url.as_str());
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.call().map_err(transport_err)?
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(request.url.as_str());
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                match request.body {
                    Some(body) => builder.send(body.as_bytes()).map_err(transport_err)?,
                    None => builder.send_empty().map_err(transport_err)?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().map_err(transport_err)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
