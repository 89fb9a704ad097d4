// HTTP transport boundary for the GitLab client.
// A real reqwest-backed transport plus an in-memory mock for unit tests.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP verbs used by the GitLab bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    /// Whether options for this verb travel in the query string rather than a body.
    pub fn uses_query(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header name/value pairs. Lookups are case-insensitive via [`header_get`].
pub type HttpHeaders = Vec<(String, String)>;

/// A fully built request: absolute URL (query included), headers, raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        header_get(&self.headers, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        header_get(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport error: {0}")]
    Transport(String),

    #[error("no mock response registered for {method} {url}")]
    NoMockResponse { method: String, url: String },
}

/// Sends one request and returns the raw response, whatever its status.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Get the first header value matching `name` (case-insensitive).
pub fn header_get<'a>(headers: &'a HttpHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (k, v) in request.headers {
            builder = builder.header(&k, &v);
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let headers: HttpHeaders = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) use mock::MockTransport;

#[cfg(test)]
mod mock {
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

    /// In-memory transport: no sockets, queued responses keyed by method and path.
    ///
    /// Routes ignore the query string so tests can assert on encoded
    /// parameters separately through [`MockTransport::requests`].
    #[derive(Clone, Default)]
    pub struct MockTransport {
        inner: Arc<Mutex<MockTransportInner>>,
    }

    #[derive(Default)]
    struct MockTransportInner {
        routes: HashMap<(HttpMethod, String), VecDeque<HttpResponse>>,
        requests: Vec<HttpRequest>,
    }

    fn strip_query(url: &str) -> String {
        url.split('?').next().unwrap_or(url).to_string()
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response for `method url`. Repeated pushes are served FIFO.
        pub fn push_response(
            &self,
            method: HttpMethod,
            url: impl Into<String>,
            response: HttpResponse,
        ) {
            let mut inner = self.inner.lock().expect("mock transport lock poisoned");
            inner
                .routes
                .entry((method, strip_query(&url.into())))
                .or_default()
                .push_back(response);
        }

        /// Queue a JSON response with the given status.
        pub fn push_json(
            &self,
            method: HttpMethod,
            url: impl Into<String>,
            status: u16,
            body: &str,
        ) {
            self.push_response(
                method,
                url,
                HttpResponse {
                    status,
                    headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                    body: body.as_bytes().to_vec(),
                },
            );
        }

        /// Queue an empty-bodied response with the given status.
        pub fn push_status(&self, method: HttpMethod, url: impl Into<String>, status: u16) {
            self.push_response(
                method,
                url,
                HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: Vec::new(),
                },
            );
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            let inner = self.inner.lock().expect("mock transport lock poisoned");
            inner.requests.clone()
        }

        pub fn last_request(&self) -> HttpRequest {
            self.requests().pop().expect("no request was sent")
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut inner = self.inner.lock().expect("mock transport lock poisoned");

            let key = (request.method, strip_query(&request.url));
            inner.requests.push(request);

            match inner.routes.get_mut(&key).and_then(|q| q.pop_front()) {
                Some(resp) => Ok(resp),
                None => Err(TransportError::NoMockResponse {
                    method: key.0.as_str().to_string(),
                    url: key.1,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_get_is_case_insensitive() {
        let headers: HttpHeaders = vec![
            ("X-Total".to_string(), "12".to_string()),
            ("x-total".to_string(), "99".to_string()),
        ];
        assert_eq!(header_get(&headers, "x-total"), Some("12"));
        assert_eq!(header_get(&headers, "X-TOTAL"), Some("12"));
        assert_eq!(header_get(&headers, "missing"), None);
    }

    #[test]
    fn test_method_query_placement() {
        assert!(HttpMethod::Get.uses_query());
        assert!(HttpMethod::Delete.uses_query());
        assert!(!HttpMethod::Post.uses_query());
        assert!(!HttpMethod::Put.uses_query());
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }

    #[tokio::test]
    async fn test_mock_replays_in_order_and_records() {
        let transport = MockTransport::new();
        let url = "https://gitlab.example.com/api/v4/user";
        transport.push_json(HttpMethod::Get, url, 200, r#"{"id":1}"#);
        transport.push_status(HttpMethod::Get, url, 500);

        let req = HttpRequest {
            method: HttpMethod::Get,
            url: format!("{url}?page=2"),
            headers: Vec::new(),
            body: Vec::new(),
        };
        let first = transport.send(req.clone()).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(first.body, br#"{"id":1}"#.to_vec());
        let second = transport.send(req.clone()).await.unwrap();
        assert_eq!(second.status, 500);

        assert_eq!(transport.requests(), vec![req.clone(), req]);
    }

    #[tokio::test]
    async fn test_mock_errors_without_route() {
        let transport = MockTransport::new();
        let req = HttpRequest {
            method: HttpMethod::Delete,
            url: "https://gitlab.example.com/api/v4/users/1".to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        };

        match transport.send(req).await {
            Err(TransportError::NoMockResponse { method, url }) => {
                assert_eq!(method, "DELETE");
                assert_eq!(url, "https://gitlab.example.com/api/v4/users/1");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_reqwest_transport_builds() {
        let transport = ReqwestTransport::with_timeout(Duration::from_millis(10));
        assert!(transport.is_ok());
    }
}
