//! Real HTTP client for the TeachPortal backend
//!
//! Single enforcement point for the error-to-redirect policy: a 401/403 on
//! any authenticated call clears the session, notifies the shell, and still
//! fails the original call so the caller's error path runs. Views must not
//! duplicate this.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use teachportal_common::{Config, Error, Result};
use teachportal_session::SessionManager;

use crate::dto::{NewStudent, SignupRequest, Student, Teacher};
use crate::{AuthFailureHandler, PortalApi};

/// Login response body: either a bare token string or `{ "token": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Bare(String),
    Object { token: Option<String> },
}

impl LoginResponse {
    fn into_token(self) -> Option<String> {
        match self {
            LoginResponse::Bare(token) => Some(token),
            LoginResponse::Object { token } => token,
        }
    }
}

/// Real TeachPortal API client backed by reqwest
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionManager,
    roster_timeout: Duration,
    on_auth_failure: Option<AuthFailureHandler>,
}

impl PortalClient {
    /// Create a new client from configuration and a session manager
    pub fn new(config: &Config, session: SessionManager) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
            roster_timeout: Duration::from_secs(config.request_timeout_secs),
            on_auth_failure: None,
        }
    }

    /// Subscribe the hosting shell to authorization failures.
    ///
    /// The handler runs after the session has been cleared; it is expected
    /// to navigate back to the login view.
    pub fn with_auth_failure_handler(mut self, handler: AuthFailureHandler) -> Self {
        self.on_auth_failure = Some(handler);
        self
    }

    /// Build a request, attaching the bearer token when one is stored.
    ///
    /// Requests proceed unauthenticated when no token is present; the
    /// server decides whether that is acceptable.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a request for an authenticated endpoint and screen the response
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(network_error)?;
        self.screen(response).await
    }

    /// Apply the authorization-failure policy, then map remaining failures
    async fn screen(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = %status, "Authorization failure; clearing session");
            self.session.logout();
            if let Some(handler) = &self.on_auth_failure {
                handler();
            }
            return Err(Error::Authorization(format!(
                "Request rejected with {status}"
            )));
        }

        if !status.is_success() {
            let message = read_error_message(response).await;
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();

        // A rejected login is a credential failure, not a stale session;
        // the redirect policy does not apply here.
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(
                "Invalid username or password.".to_string(),
            ));
        }
        if !status.is_success() {
            let message = read_error_message(response).await;
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        let token = response
            .json::<LoginResponse>()
            .await
            .ok()
            .and_then(LoginResponse::into_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication("Login did not return a token".to_string()))?;

        self.session
            .store_token(&token)
            .map_err(|e| Error::Session(e.to_string()))?;

        tracing::debug!("Login succeeded; token stored");
        Ok(token)
    }

    async fn signup(&self, request: SignupRequest) -> Result<()> {
        request
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let response = self
            .request(Method::POST, "/auth/signup")
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = read_error_message(response).await;
        if status.is_client_error() {
            // Username taken, server-side validation, and the like
            Err(Error::Authentication(message))
        } else {
            Err(Error::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        let response = self.send(self.request(Method::GET, "/students")).await?;
        response.json().await.map_err(decode_error)
    }

    async fn create_student(&self, new: NewStudent) -> Result<Student> {
        new.validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let response = self
            .send(self.request(Method::POST, "/students").json(&new))
            .await?;

        // Some deployments return the created record, some an empty body;
        // fall back to echoing the submitted one.
        let body = response.text().await.map_err(network_error)?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|_| Student::from(new)))
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let response = self
            .send(
                self.request(Method::GET, "/teacher")
                    .timeout(self.roster_timeout),
            )
            .await?;
        response.json().await.map_err(decode_error)
    }

    async fn teacher_students(&self, teacher_id: i64) -> Result<Vec<Student>> {
        let response = self
            .send(
                self.request(Method::GET, &format!("/teacher/{teacher_id}/students"))
                    .timeout(self.roster_timeout),
            )
            .await?;
        response.json().await.map_err(decode_error)
    }
}

fn network_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Network(format!("Request timed out: {e}"))
    } else {
        Error::Network(e.to_string())
    }
}

fn decode_error(e: reqwest::Error) -> Error {
    Error::Network(format!("Failed to decode response body: {e}"))
}

/// Best-effort human-readable message from an error response body.
///
/// Prefers a JSON `message` field, falls back to the raw body, then to the
/// bare status.
async fn read_error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        return format!("Request failed with {status}");
    }
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or(body),
        Err(_) => body,
    }
}
