//! Shared helpers: a live mock server on a random port and a ureq-backed
//! `Transport` that counts the requests it sends.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use mock_server::Store;
use todoapp_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Start the mock server in a background thread and return its base URL.
pub fn start_server(store: Store) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, store).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
/// come back as data for the core client to interpret.
pub fn execute(req: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Live transport that counts round-trips; clones share the counter.
#[derive(Clone, Default)]
pub struct CountingTransport {
    calls: Rc<Cell<usize>>,
}

impl CountingTransport {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Transport for CountingTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.calls.set(self.calls.get() + 1);
        execute(request)
    }
}
