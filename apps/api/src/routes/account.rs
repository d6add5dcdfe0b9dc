//! Checkout prefill endpoint.

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;

use storefront_core::CurrentUser;

use crate::auth::extract_bearer_token;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /me` — decodes the bearer token into `{ name, email }` for
/// prefilling the gateway payment modal.
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CurrentUser>, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    let token = extract_bearer_token(header)
        .ok_or_else(|| ApiError::unauthorized("Expected a bearer token"))?;

    let user = state.jwt.current_user(token)?;
    Ok(Json(user))
}
