// simplelogin-api/src/http/reqwest.rs
use super::{HttpClient, HttpError, HttpRequest, HttpResponse, Method};
use async_trait::async_trait;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("simplelogin-cli/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "reqwest")]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    /// Build a transport with the given per-request timeout
    /// (falls back to [`DEFAULT_TIMEOUT`])
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError {
                status: None,
                message: e.to_string(),
            })?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut req = self.inner.request(method, &request.url);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await.map_err(|e| HttpError {
            status: None,
            message: e.to_string(),
        })?;

        let status = resp.status().as_u16();

        let body = resp
            .bytes()
            .await
            .map_err(|e| HttpError {
                status: Some(status),
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
