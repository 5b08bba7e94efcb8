//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `ApiClient` builds `HttpRequest`
//! values and parses `HttpResponse` values; a `Transport` implementation
//! supplied by the host performs the round-trip in between. Page controllers
//! are generic over `Transport`, so tests can drive them with a scripted or
//! counting transport and the terminal host plugs in a real HTTP agent.

use tracing::debug;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL (base URL plus endpoint path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one network round-trip.
///
/// Implementations must return non-2xx responses as `Ok` data; only failures
/// to obtain a response at all (connection refused, DNS, broken body) are
/// reported as `ApiError::Transport`. No retries, no timeouts.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Execute a built request and hand the response to a parser.
///
/// A request that failed to build never reaches the transport.
pub fn round_trip<T, R>(
    transport: &T,
    request: Result<HttpRequest, ApiError>,
    parse: impl FnOnce(HttpResponse) -> Result<R, ApiError>,
) -> Result<R, ApiError>
where
    T: Transport + ?Sized,
{
    let request = request?;
    debug!(method = request.method.as_str(), path = %request.path, "sending request");
    let response = transport.execute(&request)?;
    debug!(status = response.status, path = %request.path, "received response");
    parse(response)
}
