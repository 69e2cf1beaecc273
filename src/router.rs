use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, Uri, header};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use doe_config::CorsConfig;
use doe_core::Failure;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::authenticate;
use crate::middleware::exception::exception_handler;
use crate::middleware::limits::{request_timeout, upload_limit};
use crate::middleware::negotiation::require_json_acceptable;
use crate::modules::resources::router::init_resources_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.server_config.max_upload_size).unwrap_or(usize::MAX);

    let rest = Router::new()
        .nest("/rest/v1/resource", init_resources_router())
        .method_not_allowed_fallback(method_not_allowed)
        .route_layer(middleware::from_fn(require_json_acceptable));

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(rest)
        .fallback(no_handler_found)
        .with_state(state.clone())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(state.clone(), upload_limit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_timeout,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            exception_handler,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(cors_layer(&state.cors_config))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
    ]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins)
}

async fn no_handler_found(method: Method, uri: Uri) -> Failure {
    Failure::NoHandlerFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

async fn method_not_allowed(method: Method) -> Failure {
    Failure::MethodNotAllowed {
        method: method.to_string(),
    }
}
