//! HTTP client for the wins API.

use crate::error::{Result, WinsError};
use crate::types::*;
use reqwest::Client;
use spiral::Milestone;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API base URL (local development backend).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";
const CONNECT_TIMEOUT_SECS: u64 = 8;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Wins API client.
///
/// `login` and `register` need no token; `fetch_wins` and `add_win` send the
/// access token as a bearer credential.
#[derive(Clone)]
pub struct WinsClient {
    base_url: String,
    access_token: Option<String>,
    http: Client,
}

impl WinsClient {
    /// Create a client without a token.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(WinsError::Http)?;
        Ok(Self {
            base_url: base_url.into(),
            access_token: None,
            http,
        })
    }

    /// Same client, authenticated with `token`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn auth_header(&self) -> Result<reqwest::header::HeaderValue> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(WinsError::Unauthenticated)?;
        reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| WinsError::Unauthenticated)
    }

    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.map_err(WinsError::Http)?;
        let parsed: ApiMessage = serde_json::from_str(&body).unwrap_or_default();
        let msg = match parsed.msg {
            Some(msg) => msg,
            None if body.trim().is_empty() => {
                status.canonical_reason().unwrap_or("Error").to_string()
            }
            None => body,
        };
        Err(WinsError::Api {
            status: status.as_u16(),
            msg,
        })
    }

    // ---------- Auth (no token) ----------

    /// Exchange credentials for an access token.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let url = self.url("login");
        let response = self.http.post(&url).json(credentials).send().await?;
        let body = self.check_response(response).await?.json().await?;
        Ok(body)
    }

    /// Create an account. The backend does not log the new user in.
    pub async fn register(&self, credentials: &Credentials) -> Result<ApiMessage> {
        let url = self.url("register");
        let response = self.http.post(&url).json(credentials).send().await?;
        let body = self.check_response(response).await?.json().await?;
        Ok(body)
    }

    // ---------- Wins ----------

    /// Fetch the current user's wins in server order, normalized to milestones.
    pub async fn fetch_wins(&self) -> Result<Vec<Milestone>> {
        let url = self.url("wins");
        let auth = self.auth_header()?;
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        let body: WinsResponse = self.check_response(response).await?.json().await?;
        let milestones = body.into_milestones();
        debug!(count = milestones.len(), "fetched wins");
        Ok(milestones)
    }

    /// Store one win.
    ///
    /// With [`AddWinSchema::Auto`] a failed `desc` attempt is retried once
    /// with `subject`; the last error is returned if every attempt fails.
    pub async fn add_win(&self, milestone: &Milestone, schema: AddWinSchema) -> Result<ApiMessage> {
        let url = self.url("wins");
        let auth = self.auth_header()?;
        let mut last_error = None;

        for (attempt, &field) in schema.fields().iter().enumerate() {
            if attempt > 0 {
                warn!(field = field.as_str(), "retrying add with alternate text field");
            }
            let request = AddWinRequest::new(milestone, field);
            let response = self
                .http
                .post(&url)
                .header(reqwest::header::AUTHORIZATION, auth.clone())
                .json(&request)
                .send()
                .await?;
            match self.check_response(response).await {
                Ok(response) => {
                    // Some backends answer 201 with an empty body.
                    let text = response.text().await?;
                    let body: ApiMessage = serde_json::from_str(&text).unwrap_or_default();
                    return Ok(body);
                }
                Err(err) => last_error = Some(err),
            }
        }

        Err(last_error.unwrap_or(WinsError::Api {
            status: 0,
            msg: "no add attempt made".to_string(),
        }))
    }
}
