use axum::{Json, extract::State};
use tracing::instrument;

use doe_core::{BaseRes, Failure};
use doe_models::InfoTable;

use crate::middleware::auth::{RequireAdmin, RequireResourceRead};
use crate::state::AppState;

use super::service::ResourceService;

#[utoipa::path(
    get,
    path = "/rest/v1/resource/public",
    responses(
        (status = 200, description = "Public informational contents", body = BaseRes<Vec<String>>),
        (status = 401, description = "Missing or invalid bearer token", body = BaseRes<String>),
        (status = 403, description = "Token lacks SCOPE_resource:read", body = BaseRes<String>),
        (status = 500, description = "Internal Server Error", body = BaseRes<String>)
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(subject = ?auth_user.0.subject()))]
pub async fn retrieve_public_info(
    State(state): State<AppState>,
    auth_user: RequireResourceRead,
) -> Result<Json<BaseRes<Vec<String>>>, Failure> {
    let contents =
        ResourceService::retrieve_info(state.repository(InfoTable::Public), InfoTable::Public)
            .await?;

    Ok(Json(BaseRes::success(contents)))
}

#[utoipa::path(
    get,
    path = "/rest/v1/resource/secret",
    responses(
        (status = 200, description = "Secret informational contents", body = BaseRes<Vec<String>>),
        (status = 401, description = "Missing or invalid bearer token", body = BaseRes<String>),
        (status = 403, description = "Token lacks SCOPE_ADMIN", body = BaseRes<String>),
        (status = 500, description = "Internal Server Error", body = BaseRes<String>)
    ),
    tag = "Resources",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(subject = ?auth_user.0.subject()))]
pub async fn retrieve_secret_info(
    State(state): State<AppState>,
    auth_user: RequireAdmin,
) -> Result<Json<BaseRes<Vec<String>>>, Failure> {
    let contents =
        ResourceService::retrieve_info(state.repository(InfoTable::Secret), InfoTable::Secret)
            .await?;

    Ok(Json(BaseRes::success(contents)))
}
