//! HTTP client for the external inventory backend

use axum::http::StatusCode;
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::{
    config::BackendConfig,
    error::{AppError, AppResult},
    models::Envelope,
};

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                AppError::Internal(format!("Invalid backend base URL '{}'", config.base_url))
            })?;

        Ok(Self { http, base_url })
    }

    /// Backend URL for `segments`, each percent-encoded as a single path segment
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, path: &[&str], token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &[&str],
        token: &str,
        query: &[(&str, String)],
    ) -> AppResult<Envelope<T>> {
        let request = self.request(Method::GET, path, Some(token)).query(query);
        self.execute(request, path).await
    }

    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &[&str],
        token: Option<&str>,
        body: &B,
    ) -> AppResult<Envelope<T>> {
        let request = self.request(method, path, token).json(body);
        self.execute(request, path).await
    }

    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &[&str],
        token: &str,
        form: Form,
    ) -> AppResult<Envelope<T>> {
        let request = self.request(Method::POST, path, Some(token)).multipart(form);
        self.execute(request, path).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &[&str], token: &str) -> AppResult<Envelope<T>> {
        let request = self.request(Method::DELETE, path, Some(token));
        self.execute(request, path).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &[&str],
    ) -> AppResult<Envelope<T>> {
        let path = path.join("/");
        let response = request.send().await?;
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response.bytes().await?;

        tracing::debug!("Backend {} answered {}", path, status);

        let envelope: Envelope<Value> = serde_json::from_slice(&body).unwrap_or(Envelope {
            success: status.is_success(),
            message: None,
            data: None,
        });

        if !status.is_success() || !envelope.success {
            return Err(failure(status, envelope.message));
        }

        let data = envelope
            .data
            .filter(|v| !v.is_null())
            .map(serde_json::from_value::<T>)
            .transpose()
            .map_err(|e| AppError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                message: format!("Unexpected payload from backend {}: {}", path, e),
            })?;

        Ok(Envelope {
            success: true,
            message: envelope.message,
            data,
        })
    }
}

/// Map a failed backend exchange onto the error taxonomy
fn failure(status: StatusCode, message: Option<String>) -> AppError {
    let message = message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Backend request failed")
            .to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED => AppError::Authentication(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        // A 2xx carrying `success: false`
        s if s.is_success() => AppError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            message,
        },
        s => AppError::Upstream { status: s, message },
    }
}

/// Fetch `data` or fail when the backend omitted it
pub(crate) fn require_data<T>(envelope: Envelope<T>, what: &str) -> AppResult<T> {
    envelope.data.ok_or_else(|| AppError::Upstream {
        status: StatusCode::BAD_GATEWAY,
        message: format!("Backend returned no {}", what),
    })
}
