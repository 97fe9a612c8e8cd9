/// Outbound email delivery
use crate::error::AnnounceError;
use crate::utils::logging::redact_recipients;
use async_trait::async_trait;

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver an already-encoded message; returns the provider message id
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, AnnounceError>;
}

/// Sender that only logs what it would have delivered
///
/// Used for local development and when no mail provider is configured.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

impl LogEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, AnnounceError> {
        let message_id = format!("log-{}", uuid::Uuid::new_v4());

        tracing::info!(
            message_id = %message_id,
            from = %from,
            to = %redact_recipients(to),
            size = raw_email.len(),
            "Email delivery skipped (log backend)"
        );

        Ok(message_id)
    }
}
