/// SES email sending service
use crate::error::AnnounceError;
use crate::services::mailer::EmailSender;
use crate::utils::logging::redact_recipients;
use async_trait::async_trait;

pub struct SesEmailSender {
    client: aws_sdk_ses::Client,
}

impl SesEmailSender {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration
    pub async fn from_env() -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(aws_sdk_ses::Client::new(&config))
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, AnnounceError> {
        use aws_sdk_ses::primitives::Blob;

        let raw_message = aws_sdk_ses::types::RawMessage::builder()
            .data(Blob::new(raw_email))
            .build()
            .map_err(|e| {
                AnnounceError::EmailDelivery(format!("Failed to build raw message: {}", e))
            })?;

        // A single attempt; the submission is already committed either way
        let response = self
            .client
            .send_raw_email()
            .raw_message(raw_message)
            .source(from)
            .set_destinations(Some(to.to_vec()))
            .send()
            .await
            .map_err(|e| AnnounceError::EmailDelivery(format!("SES send_raw_email failed: {}", e)))?;

        let message_id = response.message_id;

        tracing::info!(
            message_id = %message_id,
            to = %redact_recipients(to),
            "Sent email via SES"
        );
        Ok(message_id)
    }
}
