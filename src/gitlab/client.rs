// GitLab API HTTP client.
// Builds requests (query or JSON body), sends them through the transport, and maps statuses to errors.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Url;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Config, TokenKind};
use crate::error::{Error, Result};

use super::commits::CommitsService;
use super::pagination::{Page, PageInfo};
use super::transport::{
    HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport,
};
use super::types::RateLimit;
use super::users::UsersService;

const API_PATH: &str = "api/v4";
const DEFAULT_USER_AGENT: &str = concat!("labrest/", env!("CARGO_PKG_VERSION"));

/// Shared handle to one GitLab instance. Cloning is cheap and shares state.
#[derive(Clone)]
pub struct GitLabClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    headers: HttpHeaders,
    rate_limit: Mutex<RateLimit>,
}

impl GitLabClient {
    /// Create a client using the reqwest transport.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(config.timeout_secs))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client from the config file and GITLAB_* environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Config::load()?;
        Self::new(&config)
    }

    /// Create a client on top of any transport.
    pub fn with_transport(config: &Config, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let token = config.require_token()?;
        let base_url = normalize_base_url(&config.base_url)?;

        let auth = match config.token_kind {
            TokenKind::Private => ("PRIVATE-TOKEN".to_string(), token.to_string()),
            TokenKind::Oauth => ("Authorization".to_string(), format!("Bearer {}", token)),
            TokenKind::Job => ("JOB-TOKEN".to_string(), token.to_string()),
        };
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let headers = vec![
            auth,
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), user_agent),
        ];

        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                headers,
                rate_limit: Mutex::new(RateLimit::default()),
            }),
        })
    }

    /// API root, always ending in `/api/v4/`.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Rate limit window reported by the most recent response.
    pub fn rate_limit(&self) -> RateLimit {
        *self
            .inner
            .rate_limit
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    pub fn users(&self) -> UsersService {
        UsersService::new(self.clone())
    }

    pub fn commits(&self) -> CommitsService {
        CommitsService::new(self.clone())
    }

    /// GET and decode a single JSON value.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(HttpMethod::Get, path, None::<&()>).await?;
        decode(&response)
    }

    /// GET with query parameters and decode a single JSON value.
    pub(crate) async fn get_with_params<T, P>(&self, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.send(HttpMethod::Get, path, Some(params)).await?;
        decode(&response)
    }

    /// GET a JSON array along with its pagination headers.
    pub(crate) async fn get_page<T, P>(&self, path: &str, params: Option<&P>) -> Result<Page<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.send(HttpMethod::Get, path, params).await?;
        let items: Vec<T> = decode(&response)?;
        Ok(Page {
            items,
            info: PageInfo::from_response(&response),
        })
    }

    pub(crate) async fn post<T, P>(&self, path: &str, body: Option<&P>) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.send(HttpMethod::Post, path, body).await?;
        decode(&response)
    }

    pub(crate) async fn put<T, P>(&self, path: &str, body: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let response = self.send(HttpMethod::Put, path, Some(body)).await?;
        decode(&response)
    }

    /// DELETE, ignoring any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(HttpMethod::Delete, path, None::<&()>).await?;
        Ok(())
    }

    /// Send without status checking; the caller interprets the status itself.
    pub(crate) async fn send_raw<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
    ) -> Result<HttpResponse>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, params)?;
        self.dispatch(request).await
    }

    async fn send<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
    ) -> Result<HttpResponse>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, params)?;
        let url = request.url.clone();
        let response = self.dispatch(request).await?;
        self.check_response(response, &url)
    }

    fn build_request<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
    ) -> Result<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        let mut url = self.endpoint(path)?;
        let mut headers = self.inner.headers.clone();
        let mut body = Vec::new();

        if let Some(params) = params {
            if method.uses_query() {
                encode_query(&mut url, params)?;
            } else {
                body = serde_json::to_vec(params)?;
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
            }
        }

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        })
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending GitLab request");

        let response = self.inner.transport.send(request).await?;
        debug!(%method, %url, status = response.status, "received GitLab response");

        self.update_rate_limit(&response);
        Ok(response)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        if path.split('/').any(is_dot_segment) {
            return Err(Error::InvalidUrl {
                url: path.to_string(),
                reason: "dot segments are not allowed in API paths".to_string(),
            });
        }

        self.inner
            .base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &HttpResponse) {
        let parse = |name: &str| {
            response
                .header(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        let mut rate_limit = self
            .inner
            .rate_limit
            .lock()
            .unwrap_or_else(|e| e.into_inner());

        if let Some(limit) = parse("ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = parse("ratelimit-remaining") {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = parse("ratelimit-reset") {
            rate_limit.reset = reset;
        }

        if rate_limit.is_exhausted() {
            warn!(reset = rate_limit.reset, "GitLab rate limit exhausted");
        }
    }

    /// Check response status and convert errors.
    fn check_response(&self, response: HttpResponse, url: &str) -> Result<HttpResponse> {
        match response.status {
            200..=299 => Ok(response),
            401 => Err(Error::Unauthorized),
            404 => Err(Error::NotFound(url.to_string())),
            429 => {
                let reset = self.rate_limit().reset;
                let reset_at = chrono::DateTime::from_timestamp(reset as i64, 0)
                    .filter(|_| reset > 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                warn!(%url, %reset_at, "GitLab rate limited the request");
                Err(Error::RateLimited { reset_at })
            }
            status => Err(Error::UnexpectedStatus {
                status,
                message: error_message(&response.body),
            }),
        }
    }
}

/// Accepts `https://host`, `host`, or a URL already ending in `/api/v4`.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let with_api = if with_scheme.ends_with(&format!("/{}", API_PATH)) {
        with_scheme
    } else {
        format!("{}/{}", with_scheme, API_PATH)
    };

    Url::parse(&format!("{}/", with_api)).map_err(|e| Error::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Percent-escape a value so it fills exactly one path segment.
pub(crate) fn path_escape(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// `.` and `..` (escaped or not) would be resolved away by URL joining.
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
    )
}

/// Append `params` to the query string. Nulls are dropped, arrays become `key[]`.
pub(crate) fn encode_query<P: Serialize + ?Sized>(url: &mut Url, params: &P) -> Result<()> {
    let map = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        Value::Null => return Ok(()),
        other => {
            return Err(Error::Other(format!(
                "query parameters must be an object, got {}",
                other
            )));
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        push_query_pairs(&mut pairs, key, value);
    }

    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(())
}

fn push_query_pairs(pairs: &mut Vec<(String, String)>, key: String, value: Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s)),
        Value::Array(items) => {
            for item in items {
                push_query_pairs(pairs, format!("{}[]", key), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_query_pairs(pairs, format!("{}[{}]", key, sub), item);
            }
        }
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// GitLab error bodies carry `message` (string or field map) or `error`.
fn error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        match value.get("message") {
            Some(Value::String(message)) => return message.clone(),
            Some(other @ (Value::Object(_) | Value::Array(_))) => return other.to_string(),
            _ => {}
        }
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            return match value.get("error_description").and_then(Value::as_str) {
                Some(description) => format!("{}: {}", error, description),
                None => error.to_string(),
            };
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        "no response body".to_string()
    } else {
        text
    }
}
