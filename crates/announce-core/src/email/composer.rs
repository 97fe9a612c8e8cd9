/// Notification composer using lettre crate
use crate::constants::{NOTIFICATION_DATE_FORMAT, NOTIFICATION_INTRO, NOTIFICATION_SUBJECT};
use crate::error::AnnounceError;
use crate::models::{
    NewSubmission, Notification, NotificationAttachment, RewindableSource, UploadedFile,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, Message, MultiPart, SinglePart};
use std::io::Read;

pub struct NotificationComposer {
    from: String,
}

impl NotificationComposer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// Build the notification for a validated submission
    ///
    /// Every slide is re-read from the start of its source; validation has
    /// already consumed it once.
    pub fn compose(
        &self,
        submission: &NewSubmission,
        recipients: Vec<String>,
        slides: &[UploadedFile],
    ) -> Result<Notification, AnnounceError> {
        let mut attachments = Vec::with_capacity(slides.len());
        for slide in slides {
            let mut data = Vec::with_capacity(slide.len());
            slide.open().read_to_end(&mut data)?;
            attachments.push(NotificationAttachment {
                filename: slide.name().to_string(),
                content_type: slide.content_type().to_string(),
                data: Bytes::from(data),
            });
        }

        Ok(Notification::builder()
            .subject(NOTIFICATION_SUBJECT)
            .body(Self::body(submission))
            .from(self.from.clone())
            .to(recipients)
            .attachments(attachments)
            .build())
    }

    /// Plain-text body listing the submitted fields
    pub fn body(submission: &NewSubmission) -> String {
        format!(
            "{}\n\nTitle: {}\nContact Email: {}\nDescription: {}\nStart Date: {}\nEnd Date: {}\n",
            NOTIFICATION_INTRO,
            submission.title,
            submission.email.as_deref().unwrap_or_default(),
            submission.description.as_deref().unwrap_or_default(),
            format_date(&submission.start_date),
            format_date(&submission.end_date),
        )
    }

    /// Encode a notification as raw RFC 5322 bytes
    pub fn render(&self, notification: &Notification) -> Result<Vec<u8>, AnnounceError> {
        let mut message_builder = Message::builder()
            .from(to_mailbox(&notification.from)?)
            .subject(&notification.subject);

        for to in &notification.to {
            message_builder = message_builder.to(to_mailbox(to)?);
        }

        let message = if notification.attachments.is_empty() {
            message_builder
                .body(notification.body.clone())
                .map_err(|e| {
                    AnnounceError::EmailComposition(format!("Failed to build text message: {}", e))
                })?
        } else {
            tracing::debug!(
                attachment_count = notification.attachments.len(),
                total_size = notification.total_attachment_size(),
                "Building notification with attachments"
            );

            let mut multipart =
                MultiPart::mixed().singlepart(SinglePart::plain(notification.body.clone()));

            for attachment in &notification.attachments {
                let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
                    AnnounceError::EmailComposition(format!(
                        "Invalid content type '{}': {}",
                        attachment.content_type, e
                    ))
                })?;

                multipart = multipart.singlepart(
                    Attachment::new(attachment.filename.clone())
                        .body(attachment.data.to_vec(), content_type),
                );
            }

            message_builder.multipart(multipart).map_err(|e| {
                AnnounceError::EmailComposition(format!(
                    "Failed to build multipart message with attachments: {}",
                    e
                ))
            })?
        };

        Ok(message.formatted())
    }
}

fn to_mailbox(address: &str) -> Result<Mailbox, AnnounceError> {
    address.parse::<Mailbox>().map_err(|e| {
        AnnounceError::EmailComposition(format!("Invalid email address '{}': {}", address, e))
    })
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format(NOTIFICATION_DATE_FORMAT).to_string()
}
