//! REST implementation of the auth gateway.

use async_trait::async_trait;
use reqwest::Method;

use super::client::ApiClient;
use super::dto::{AuthResponseDto, CredentialsDto};
use crate::domain::entities::{AuthSession, Credentials};
use crate::domain::gateways::AuthGateway;
use crate::error::AppError;

const LOGIN_FAILED: &str = "Invalid credentials. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Auth gateway backed by `/api/auth/login` and `/api/auth/register`.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn authenticate(
        &self,
        action: &str,
        credentials: Credentials,
        fallback: &str,
    ) -> Result<AuthSession, AppError> {
        let body = CredentialsDto {
            email: credentials.email,
            password: credentials.password,
        };
        let request = self
            .client
            .request(Method::POST, &["api", "auth", action])
            .json(&body);
        let response: AuthResponseDto = self.client.send_json(request, fallback).await?;
        Ok(response.into())
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AppError> {
        self.authenticate("login", credentials, LOGIN_FAILED).await
    }

    async fn register(&self, credentials: Credentials) -> Result<AuthSession, AppError> {
        self.authenticate("register", credentials, REGISTER_FAILED).await
    }
}
