use std::sync::Arc;

use anyhow::Context;

use doe_auth::JwtDecoder;
use doe_config::{AuthConfig, CorsConfig, MessageConfig, ServerConfig};
use doe_core::{ExceptionClassifier, MessageSource};
use doe_db::{InfoRepository, PgInfoRepository, init_db_pool};
use doe_models::InfoTable;

#[derive(Clone)]
pub struct AppState {
    pub public_info: Arc<dyn InfoRepository>,
    pub secret_info: Arc<dyn InfoRepository>,
    pub decoder: Arc<JwtDecoder>,
    pub classifier: Arc<ExceptionClassifier>,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        public_info: Arc<dyn InfoRepository>,
        secret_info: Arc<dyn InfoRepository>,
        decoder: JwtDecoder,
        classifier: ExceptionClassifier,
        server_config: ServerConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let max_upload_size = i64::try_from(server_config.max_upload_size).unwrap_or(i64::MAX);

        Self {
            public_info,
            secret_info,
            decoder: Arc::new(decoder),
            classifier: Arc::new(classifier.with_max_upload_size(max_upload_size)),
            server_config,
            cors_config,
        }
    }

    pub fn repository(&self, table: InfoTable) -> &dyn InfoRepository {
        match table {
            InfoTable::Public => self.public_info.as_ref(),
            InfoTable::Secret => self.secret_info.as_ref(),
        }
    }
}

pub fn init_classifier(config: &MessageConfig) -> anyhow::Result<ExceptionClassifier> {
    let messages = MessageSource::load(config.overrides_path.as_deref())
        .context("Failed to load message templates")?;

    Ok(ExceptionClassifier::new(
        Arc::new(messages),
        config.namespace.clone(),
    ))
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let auth_config = AuthConfig::from_env();
    let decoder = JwtDecoder::from_config(&auth_config).with_context(|| {
        format!(
            "Failed to load RSA public key from {}",
            auth_config.public_key_path.display()
        )
    })?;

    Ok(AppState::new(
        Arc::new(PgInfoRepository::new(pool.clone(), InfoTable::Public)),
        Arc::new(PgInfoRepository::new(pool, InfoTable::Secret)),
        decoder,
        init_classifier(&MessageConfig::from_env())?,
        ServerConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
