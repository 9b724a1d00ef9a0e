//! Backend authentication endpoints

use reqwest::Method;
use serde_json::Value;

use super::client::{require_data, BackendClient};
use crate::{
    error::AppResult,
    models::{Envelope, LoginRequest, RegisterRequest, TokenPair},
};

#[derive(Clone)]
pub struct AuthRepository {
    client: BackendClient,
}

impl AuthRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for an access/refresh token pair
    pub async fn login(&self, request: &LoginRequest) -> AppResult<(TokenPair, Option<String>)> {
        let envelope: Envelope<TokenPair> = self
            .client
            .send_json(Method::POST, &["auth", "login"], None, request)
            .await?;
        let message = envelope.message.clone();
        Ok((require_data(envelope, "tokens")?, message))
    }

    /// Register a user; the created user is passed through untouched
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<Envelope<Value>> {
        self.client
            .send_json(Method::POST, &["auth", "register"], None, request)
            .await
    }
}
