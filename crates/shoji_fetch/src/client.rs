//! HTTP client wrapper with cache hints and uniform error mapping

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use shoji_core::{Result, StateCell, StateRegistry, UiError};

/// How a request interacts with intermediary caches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve from cache whenever possible.
    Force,
    /// Never serve from cache; the URL is busted with a timestamp.
    NoStore,
    /// Cache aggressively, keyed by an explicit version tag.
    Version(String),
}

impl CachePolicy {
    fn cache_control(&self) -> &'static str {
        match self {
            Self::Force => "force-cache",
            Self::NoStore => "no-cache",
            Self::Version(_) => "public, max-age=31536000",
        }
    }

    fn bust_param(&self) -> Option<String> {
        match self {
            Self::Force => None,
            Self::NoStore => Some(epoch_millis().to_string()),
            Self::Version(v) => Some(v.clone()),
        }
    }
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// One request under construction.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub cache: Option<CachePolicy>,
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            cache: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// JSON body. On GET requests the top-level fields become query
    /// parameters instead.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn cache(mut self, policy: CachePolicy) -> Self {
        self.cache = Some(policy);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Query parameters this request carries, combining GET body fields and
    /// the cache-bust tag.
    fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if self.method == Method::GET {
            if let Some(Value::Object(map)) = &self.body {
                for (key, value) in map {
                    params.push((key.clone(), scalar_to_string(value)));
                }
            }
        }
        if let Some(bust) = self.cache.as_ref().and_then(CachePolicy::bust_param) {
            params.push(("cache".to_string(), bust));
        }
        params
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pull a human-readable message out of an error response body. JSON bodies
/// with a `message` or `error` field win, anything else is passed through.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }
    body.to_string()
}

/// Clears the in-flight flag when the request future completes or is
/// dropped mid-flight (caller timeout, `select!` cancellation).
struct ProcessingGuard(Arc<StateCell<bool>>);

impl ProcessingGuard {
    fn engage(flag: &Arc<StateCell<bool>>) -> Self {
        flag.set(true);
        Self(Arc::clone(flag))
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Thin wrapper over [`reqwest::Client`] that exposes an observable
/// in-flight flag and maps failures into [`UiError`].
#[derive(Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    processing: Arc<StateCell<bool>>,
}

impl FetchClient {
    pub fn new(registry: &StateRegistry) -> Self {
        Self {
            http: reqwest::Client::new(),
            processing: registry.state("ui-fetch-processing", || false),
        }
    }

    pub fn with_http(registry: &StateRegistry, http: reqwest::Client) -> Self {
        Self {
            http,
            processing: registry.state("ui-fetch-processing", || false),
        }
    }

    /// `true` while any request is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing.get()
    }

    /// Observable cell backing [`FetchClient::is_processing`].
    pub fn processing_cell(&self) -> Arc<StateCell<bool>> {
        Arc::clone(&self.processing)
    }

    /// Execute a request and return the raw body. Non-2xx responses become
    /// [`UiError::Http`], transport failures become [`UiError::Transport`].
    pub async fn send(&self, request: FetchRequest) -> Result<String> {
        let _processing = ProcessingGuard::engage(&self.processing);
        self.send_inner(request).await
    }

    /// Execute a request and deserialize its JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: FetchRequest) -> Result<T> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| UiError::Transport(e.to_string()))
    }

    async fn send_inner(&self, request: FetchRequest) -> Result<String> {
        tracing::debug!(method = %request.method, url = %request.url, "request started");
        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(header_map(&request.headers)?);
        if let Some(policy) = &request.cache {
            builder = builder.header(CACHE_CONTROL, policy.cache_control());
        }
        let params = request.query_params();
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        if request.method != Method::GET {
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| UiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UiError::Transport(e.to_string()))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %request.url, "request failed");
            return Err(UiError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| UiError::Transport(e.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| UiError::Transport(e.to_string()))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_body_folds_into_query() {
        let request = FetchRequest::get("https://api.example.com/items")
            .body(json!({"page": 2, "q": "shoji"}));
        let params = request.query_params();
        assert!(params.contains(&("page".to_string(), "2".to_string())));
        assert!(params.contains(&("q".to_string(), "shoji".to_string())));
    }

    #[test]
    fn post_body_stays_out_of_query() {
        let request = FetchRequest::post("https://api.example.com/items")
            .body(json!({"name": "door"}));
        assert!(request.query_params().is_empty());
    }

    #[test]
    fn cache_policies_map_to_headers_and_params() {
        assert_eq!(CachePolicy::Force.cache_control(), "force-cache");
        assert!(CachePolicy::Force.bust_param().is_none());

        assert_eq!(CachePolicy::NoStore.cache_control(), "no-cache");
        let bust = CachePolicy::NoStore.bust_param().unwrap();
        assert!(bust.parse::<u128>().is_ok());

        let versioned = CachePolicy::Version("v3".to_string());
        assert_eq!(versioned.cache_control(), "public, max-age=31536000");
        assert_eq!(versioned.bust_param().as_deref(), Some("v3"));
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message": "nope"}"#), "nope");
        assert_eq!(error_message(r#"{"error": "denied"}"#), "denied");
        assert_eq!(error_message("plain text failure"), "plain text failure");
    }

    #[test]
    fn invalid_header_is_rejected() {
        let headers = vec![("bad name".to_string(), "x".to_string())];
        assert!(header_map(&headers).is_err());
    }

    #[test]
    fn processing_guard_clears_flag_on_drop() {
        let registry = StateRegistry::new();
        let flag = registry.state("ui-fetch-processing", || false);
        let guard = ProcessingGuard::engage(&flag);
        assert!(flag.get());
        drop(guard);
        assert!(!flag.get());
    }

    #[tokio::test]
    async fn processing_flag_clears_when_request_is_dropped() {
        let registry = StateRegistry::new();
        let client = FetchClient::new(&registry);

        // TEST-NET-1 address, the connection never completes.
        let request =
            FetchRequest::get("http://192.0.2.1/slow").timeout(Duration::from_secs(30));
        let raced =
            tokio::time::timeout(Duration::from_millis(100), client.send(request)).await;

        match raced {
            // Timed out: the request future was dropped mid-flight.
            Err(_) => {}
            // Connect failed fast on this host; still an error outcome.
            Ok(outcome) => assert!(outcome.is_err()),
        }
        assert!(!client.is_processing());
    }
}
