#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use doe_resource_server::doe_auth::{Claims, JwtDecoder, Scopes, public_key_from_str};
use doe_resource_server::doe_config::{CorsConfig, ServerConfig};
use doe_resource_server::doe_core::{ExceptionClassifier, MessageSource};
use doe_resource_server::doe_db::InfoRepository;
use doe_resource_server::doe_models::InfoRecord;
use doe_resource_server::router::init_router;
use doe_resource_server::state::AppState;

pub const PRIVATE_KEY: &str = include_str!("../fixtures/jwt_private.pem");
pub const OTHER_PRIVATE_KEY: &str = include_str!("../fixtures/other_private.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/jwt_public.pem");

pub const ISSUER: &str = "https://auth.doe.io";

/// Repository serving fixed records.
pub struct InMemoryRepository(pub Vec<InfoRecord>);

impl InMemoryRepository {
    pub fn with_contents(contents: &[Option<&str>]) -> Self {
        Self(
            contents
                .iter()
                .enumerate()
                .map(|(i, contents)| InfoRecord {
                    id: i as i32 + 1,
                    contents: contents.map(str::to_string),
                    created_at: Utc::now(),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl InfoRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<InfoRecord>, sqlx::Error> {
        Ok(self.0.clone())
    }
}

/// Repository whose every query fails with a driver error.
pub struct FailingRepository;

pub const DRIVER_ERROR: &str = "FATAL: password authentication failed for user \"doe\"";

#[async_trait]
impl InfoRepository for FailingRepository {
    async fn find_all(&self) -> Result<Vec<InfoRecord>, sqlx::Error> {
        Err(sqlx::Error::Protocol(DRIVER_ERROR.to_string()))
    }
}

/// Repository that answers only after a delay.
pub struct SlowRepository(pub Duration);

#[async_trait]
impl InfoRepository for SlowRepository {
    async fn find_all(&self) -> Result<Vec<InfoRecord>, sqlx::Error> {
        tokio::time::sleep(self.0).await;
        Ok(Vec::new())
    }
}

pub fn decoder(issuer: Option<&str>) -> JwtDecoder {
    let key = public_key_from_str(PUBLIC_KEY).unwrap();
    JwtDecoder::new(key, issuer.map(str::to_string), 60)
}

pub fn classifier() -> ExceptionClassifier {
    ExceptionClassifier::new(Arc::new(MessageSource::bundled()), "doe")
}

pub fn test_state_with(
    public_info: Arc<dyn InfoRepository>,
    secret_info: Arc<dyn InfoRepository>,
    server_config: ServerConfig,
) -> AppState {
    AppState::new(
        public_info,
        secret_info,
        decoder(None),
        classifier(),
        server_config,
        CorsConfig::default(),
    )
}

pub fn test_state(
    public_info: Arc<dyn InfoRepository>,
    secret_info: Arc<dyn InfoRepository>,
) -> AppState {
    test_state_with(public_info, secret_info, ServerConfig::default())
}

pub fn setup_test_app() -> Router {
    init_router(test_state(
        Arc::new(InMemoryRepository::with_contents(&[
            Some("public one"),
            None,
            Some("  "),
            Some("public two"),
        ])),
        Arc::new(InMemoryRepository::with_contents(&[Some("secret one"), Some("")])),
    ))
}

pub fn claims_with_scope(scope: &str) -> Claims {
    let now = Utc::now().timestamp();

    Claims {
        sub: Some("test-client".to_string()),
        iss: Some(ISSUER.to_string()),
        exp: Some(now + 300),
        iat: Some(now),
        scope: Some(Scopes::Delimited(scope.to_string())),
        ..Default::default()
    }
}

pub fn sign(claims: &Claims, private_key: &str) -> String {
    let key = EncodingKey::from_rsa_pem(private_key.as_bytes()).unwrap();
    encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
}

pub fn token_with_scope(scope: &str) -> String {
    sign(&claims_with_scope(scope), PRIVATE_KEY)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, json)
}
