//! HTTP client for a Eurocore instance.

use crate::error::{EurocoreError, Result};
use crate::models::{LoginRequest, LoginResponse, NewTelegram, Template};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Eurocore telegram queue.
///
/// Every call is a single attempt. Authentication is a plain
/// username/password exchange for a bearer token.
#[derive(Debug, Clone)]
pub struct EurocoreClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl EurocoreClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange the configured credentials for a bearer token.
    pub async fn login(&self) -> Result<String> {
        let url = format!("{}/login", self.base_url);
        debug!("Logging in to Eurocore as {}", self.username);

        let request = self.http.post(&url).json(&LoginRequest {
            username: &self.username,
            password: &self.password,
        });
        let response: LoginResponse = self.send_json(&url, request).await?;

        response
            .token
            .filter(|token| !token.is_empty())
            .ok_or(EurocoreError::MissingToken)
    }

    /// Look up a stored telegram template by id.
    pub async fn template(&self, token: &str, template_id: &str) -> Result<Template> {
        let url = format!("{}/templates/{}", self.base_url, template_id);
        let request = self.http.get(&url).bearer_auth(token);
        self.send_json(&url, request).await
    }

    /// Queue a batch of telegrams. Returns the HTTP status on success.
    ///
    /// The batch is all-or-nothing at the transport level.
    pub async fn send_telegrams(&self, token: &str, telegrams: &[NewTelegram]) -> Result<u16> {
        let url = format!("{}/telegrams", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(telegrams)
            .send()
            .await
            .map_err(|source| EurocoreError::Request {
                url: url.clone(),
                source,
            })?;

        let status = check_status(&url, response).await?.status().as_u16();
        info!("Telegram request sent: {} ({} telegrams)", status, telegrams.len());
        Ok(status)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|source| EurocoreError::Request {
            url: url.to_string(),
            source,
        })?;

        check_status(url, response)
            .await?
            .json::<T>()
            .await
            .map_err(|source| EurocoreError::InvalidResponse {
                url: url.to_string(),
                source,
            })
    }
}

async fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(EurocoreError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TelegramType;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    // ============================================================================
    // Fake Eurocore
    // ============================================================================

    #[derive(Clone, Default)]
    struct FakeEurocore {
        queued: Arc<Mutex<Vec<Value>>>,
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "Bearer tok-123")
    }

    async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["username"] == "bot" && body["password"] == "hunter2" {
            (StatusCode::OK, Json(json!({ "token": "tok-123" })))
        } else if body["username"] == "tokenless" {
            (StatusCode::OK, Json(json!({})))
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad credentials" })))
        }
    }

    async fn template(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({})));
        }
        if id != "recruit" {
            return (StatusCode::NOT_FOUND, Json(json!({})));
        }
        (
            StatusCode::OK,
            Json(json!({ "nation": "the_europeian_government", "tgid": 987, "key": "secret" })),
        )
    }

    async fn telegrams(
        State(state): State<FakeEurocore>,
        headers: HeaderMap,
        Json(body): Json<Vec<Value>>,
    ) -> StatusCode {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED;
        }
        state.queued.lock().unwrap().extend(body);
        StatusCode::ACCEPTED
    }

    async fn start_fake_eurocore() -> (String, FakeEurocore, tokio::task::JoinHandle<()>) {
        let state = FakeEurocore::default();
        let app = Router::new()
            .route("/login", post(login))
            .route("/templates/:id", get(template))
            .route("/telegrams", post(telegrams))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake Eurocore");
        let addr = listener.local_addr().expect("Failed to get local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake Eurocore failed");
        });

        (format!("http://{}/", addr), state, handle)
    }

    fn telegram(recipient: &str) -> NewTelegram {
        NewTelegram {
            sender: "the_europeian_government".to_string(),
            id: "12345".to_string(),
            secret_key: "abcdef".to_string(),
            recipient: recipient.to_string(),
            tg_type: TelegramType::Standard,
        }
    }

    #[tokio::test]
    async fn test_login_and_send() {
        let (addr, state, handle) = start_fake_eurocore().await;
        let client = EurocoreClient::new(addr, "bot", "hunter2").unwrap();

        let token = client.login().await.unwrap();
        assert_eq!(token, "tok-123");

        let status = client
            .send_telegrams(&token, &[telegram("alpha"), telegram("gamma")])
            .await
            .unwrap();
        assert_eq!(status, 202);

        let queued = state.queued.lock().unwrap();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0]["recipient"], "alpha");
        assert_eq!(queued[1]["recipient"], "gamma");
        assert_eq!(queued[1]["tg_type"], "standard");
        drop(queued);

        handle.abort();
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_status() {
        let (addr, _state, handle) = start_fake_eurocore().await;
        let client = EurocoreClient::new(addr, "bot", "wrong").unwrap();

        let err = client.login().await.unwrap_err();
        assert!(matches!(err, EurocoreError::Status { status: 401, .. }));

        handle.abort();
    }

    #[tokio::test]
    async fn test_login_without_token_is_error() {
        let (addr, _state, handle) = start_fake_eurocore().await;
        let client = EurocoreClient::new(addr, "tokenless", "x").unwrap();

        assert!(matches!(client.login().await, Err(EurocoreError::MissingToken)));

        handle.abort();
    }

    #[tokio::test]
    async fn test_template_lookup() {
        let (addr, _state, handle) = start_fake_eurocore().await;
        let client = EurocoreClient::new(addr, "bot", "hunter2").unwrap();
        let token = client.login().await.unwrap();

        let template = client.template(&token, "recruit").await.unwrap();
        assert_eq!(template.nation, "the_europeian_government");
        assert_eq!(template.tgid, 987);

        let err = client.template(&token, "missing").await.unwrap_err();
        assert!(matches!(err, EurocoreError::Status { status: 404, .. }));

        handle.abort();
    }

    #[tokio::test]
    async fn test_send_with_bad_token_is_rejected() {
        let (addr, state, handle) = start_fake_eurocore().await;
        let client = EurocoreClient::new(addr, "bot", "hunter2").unwrap();

        let err = client.send_telegrams("nope", &[telegram("alpha")]).await.unwrap_err();
        assert!(matches!(err, EurocoreError::Status { status: 401, .. }));
        assert!(state.queued.lock().unwrap().is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_request_error_names_url_once_and_keeps_cause_as_source() {
        use std::error::Error;

        // nothing listens on this port
        let client = EurocoreClient::new("http://127.0.0.1:9", "bot", "hunter2").unwrap();

        let err = client.login().await.unwrap_err();

        assert!(matches!(err, EurocoreError::Request { .. }));
        assert_eq!(err.to_string(), "Request to http://127.0.0.1:9/login failed");
        assert!(err.source().is_some());
    }
}
