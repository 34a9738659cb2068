use log::debug;
use serde::Serialize;

/// Base address of the local agent API
pub const API_BASE_URL: &str = "http://localhost:8765/api";

/// HTTP client for the agent API
///
/// Thin wrapper around `reqwest::Client` pinned to a base URL. Requests are
/// single-shot: no retries, no custom timeout, no error translation. Status
/// inspection and body parsing stay with the caller.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Client against the fixed local API base URL
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ApiClient {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Full request URL for `path`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Issue a GET request for `path` and return the pending response
    ///
    /// No body, no custom headers. Transport failures and non-2xx statuses
    /// surface to the caller unmodified.
    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        self.client.get(&url).send().await
    }

    /// POST `content` as a JSON body to `path` and return the pending response
    ///
    /// `content` is serialized with serde_json and the request carries a
    /// `Content-Type: application/json` header.
    pub async fn post<T>(&self, path: &str, content: &T) -> reqwest::Result<reqwest::Response>
    where
        T: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        self.client.post(&url).json(content).send().await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// GET `path` on the fixed local API base URL
///
/// Each call builds its own transport client; nothing is shared between
/// calls.
pub async fn get_request(path: &str) -> reqwest::Result<reqwest::Response> {
    ApiClient::new().get(path).await
}

/// POST `content` as JSON to `path` on the fixed local API base URL
pub async fn post_request<T>(path: &str, content: &T) -> reqwest::Result<reqwest::Response>
where
    T: Serialize + ?Sized,
{
    ApiClient::new().post(path, content).await
}
