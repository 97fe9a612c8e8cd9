/// API Context - shared state for all API handlers
use announce_core::config::EmailBackend;
use announce_core::services::{
    EmailSender, LocalMediaStorage, LogEmailSender, MediaStorage, SesEmailSender, SqliteStore,
    SubmissionStore,
};
use announce_core::{AnnounceError, AppConfig, SubmissionHandler};
use std::sync::Arc;

/// API Context contains shared resources for API handlers
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,

    pub store: Arc<dyn SubmissionStore>,

    /// Slide files under the media root
    pub media: Arc<dyn MediaStorage>,

    /// Submission pipeline
    pub submissions: Arc<SubmissionHandler>,
}

impl ApiContext {
    /// Create a new API context from validated configuration
    pub async fn new(config: AppConfig) -> Result<Arc<Self>, AnnounceError> {
        let store = Arc::new(SqliteStore::connect(&config.database_url).await?);
        let media = Arc::new(LocalMediaStorage::new(config.media_root.clone()));

        let sender: Arc<dyn EmailSender> = match config.email_backend {
            EmailBackend::Log => Arc::new(LogEmailSender::new()),
            EmailBackend::Ses => Arc::new(SesEmailSender::from_env().await),
        };

        tracing::info!(
            database = %config.database_url,
            media_root = %config.media_root.display(),
            backend = ?config.email_backend,
            "API context initialized"
        );

        Ok(Self::from_parts(config, store, media, sender))
    }

    /// Assemble a context from already-built services
    pub fn from_parts(
        config: AppConfig,
        store: Arc<dyn SubmissionStore>,
        media: Arc<dyn MediaStorage>,
        sender: Arc<dyn EmailSender>,
    ) -> Arc<Self> {
        let submissions = Arc::new(SubmissionHandler::new(
            store.clone(),
            media.clone(),
            sender,
            config.recipient_policy,
            config.email_from.clone(),
        ));

        Arc::new(Self {
            config: Arc::new(config),
            store,
            media,
            submissions,
        })
    }
}
