use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{retrieve_public_info, retrieve_secret_info};

pub fn init_resources_router() -> Router<AppState> {
    Router::new()
        .route("/public", get(retrieve_public_info))
        .route("/secret", get(retrieve_secret_info))
}
