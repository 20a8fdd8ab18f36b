//! Thin REST client shared by the HTTP gateways.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use super::dto::ErrorBodyDto;
use crate::config::Config;
use crate::error::AppError;

/// REST client bound to one backend base URL and, optionally, one bearer token.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Builds a client with the given transport timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fetch`] if the base URL is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            AppError::fetch(None, format!("Invalid API base URL '{base_url}': {e}"))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::fetch(
                None,
                format!("API base URL '{base_url}' cannot carry a path"),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::fetch(None, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Builds a client from the console configuration, including `API_TOKEN`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = Self::new(&config.api_base_url, config.request_timeout())?;
        Ok(match config.api_token {
            Some(ref token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Returns a clone that attaches `Authorization: Bearer <token>`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.http.request(method, self.endpoint(segments));
        match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body.
    ///
    /// `fallback` is used as the error message when the backend gives none.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, AppError> {
        let response = self.send(request, fallback).await?;
        let status = response.status();
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Undecodable response body");
            AppError::fetch(Some(status.as_u16()), fallback)
        })
    }

    /// Sends the request and discards any body.
    pub(crate) async fn send_empty(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<(), AppError> {
        self.send(request, fallback).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Response, AppError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response arrived");
            AppError::from(e)
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }
        Err(error_from_response(response, fallback).await)
    }
}

/// Maps a non-2xx response onto the error taxonomy.
async fn error_from_response(response: Response, fallback: &str) -> AppError {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = serde_json::from_value::<ErrorBodyDto>(body.clone())
        .ok()
        .and_then(|b| b.text())
        .unwrap_or_else(|| fallback.to_string());

    classify(status, message, body)
}

fn classify(status: StatusCode, message: String, body: Value) -> AppError {
    match status {
        StatusCode::NOT_FOUND => AppError::not_found(message, body),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::validation(message, json!({ "status": status.as_u16(), "body": body }))
        }
        _ => AppError::fetch(Some(status.as_u16()), message),
    }
}
