//! Bearer-token authentication for the encode API.

use crate::config::AuthConfig;
use crate::server::error::ApiError;
use crate::server::AppContext;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};
use serde::Serialize;

/// Check if authentication is required and valid
fn check_auth(auth_config: &AuthConfig, bearer_token: Option<&str>) -> Result<(), ApiError> {
    if !auth_config.enabled {
        return Ok(());
    }

    if let (Some(token), Some(api_key)) = (bearer_token, auth_config.api_key.as_deref()) {
        if !api_key.is_empty() && token == api_key {
            return Ok(());
        }
    }

    Err(ApiError::unauthorized("Authentication required"))
}

/// Middleware for API key authentication
pub async fn api_auth_middleware(
    State(ctx): State<AppContext>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer_token = bearer.as_ref().map(|b| b.token());

    check_auth(&ctx.config.auth, bearer_token).inspect_err(|_| {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
    })?;

    Ok(next.run(request).await)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AuthStatusResponse {
    pub status: String,
    pub auth_enabled: bool,
    pub authenticated: bool,
}

/// Check current auth status
#[utoipa::path(
    get,
    path = "/api/auth/status",
    tag = "auth",
    responses(
        (status = 200, description = "Authentication state of the caller", body = AuthStatusResponse)
    )
)]
pub async fn auth_status(
    State(ctx): State<AppContext>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Json<AuthStatusResponse> {
    let auth_config = &ctx.config.auth;
    let authenticated = check_auth(auth_config, bearer.as_ref().map(|b| b.token())).is_ok();

    Json(AuthStatusResponse {
        status: "OK".to_string(),
        auth_enabled: auth_config.enabled,
        authenticated,
    })
}
