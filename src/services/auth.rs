//! Authentication service (credentials are checked by the backend)

use serde_json::Value;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Envelope, LoginRequest, RegisterRequest, TokenPair},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<(TokenPair, Option<String>)> {
        request.validate()?;
        let result = self.repository.auth.login(request).await;
        match &result {
            Ok(_) => tracing::info!("Login successful for NIM {}", request.nim),
            Err(e) => tracing::warn!("Login failed for NIM {}: {}", request.nim, e),
        }
        result
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<Envelope<Value>> {
        request.validate()?;
        self.repository.auth.register(request).await
    }
}
