//! ureq-backed `Transport`.
//!
//! ureq is blocking, so each request runs on tokio's blocking pool and the
//! issuing task awaits the join handle. The event loop stays free to handle
//! other commands while a request is in flight.

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    /// Non-2xx statuses come back as data; `TodoClient` interprets them.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

/// Execute an `HttpRequest` on the calling thread.
pub fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let path = req.path.as_str();
    let headers = req.headers.as_slice();

    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(path), headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(path), headers).call(),
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(path), headers).send(body.as_bytes()),
        (HttpMethod::Post, None) => with_headers(agent.post(path), headers).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers(agent.put(path), headers).send(body.as_bytes()),
        (HttpMethod::Put, None) => with_headers(agent.put(path), headers).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse { status, headers, body })
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
