//! Authentication endpoints: login, registration and session cookies

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use serde_json::Value;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::{Envelope, LoginRequest, RegisterRequest, TokenPair},
    AppState,
};

fn session_cookie(name: &str, value: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Strict)
        .path("/")
        .build()
}

fn expired_cookie(name: &str, config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), config);
    cookie.make_removal();
    cookie
}

/// Log in with NIM and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookies set", body = TokenPair),
        (status = 400, description = "Missing NIM or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<(CookieJar, Json<Envelope<TokenPair>>)> {
    let (tokens, message) = state.services.auth.login(&request).await?;

    let session = &state.config.session;
    let jar = jar
        .add(session_cookie(&session.access_cookie, tokens.access_token.clone(), session))
        .add(session_cookie(&session.refresh_cookie, tokens.refresh_token.clone(), session));

    let envelope = Envelope::ok(tokens).with_message(message.unwrap_or_else(|| "Login successful".to_string()));
    Ok((jar, Json(envelope)))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> AppResult<(StatusCode, Json<Envelope<Value>>)> {
    let created = state.services.auth.register(&request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Log out by expiring the session cookies
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookies cleared")
    )
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Envelope<()>>) {
    let session = &state.config.session;
    let jar = jar
        .add(expired_cookie(&session.access_cookie, session))
        .add(expired_cookie(&session.refresh_cookie, session));

    (jar, Json(Envelope::message("Logout successful")))
}
