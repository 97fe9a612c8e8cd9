//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use announce_core::error::AnnounceError;
use announce_core::forms::SubmissionForm;
use announce_core::models::{NewContact, UploadedFile};
use announce_core::routing::RecipientPolicy;
use announce_core::services::{
    EmailSender, LocalMediaStorage, MediaStorage, SqliteStore, SubmissionStore,
};
use announce_core::SubmissionHandler;
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const TEST_FROM: &str = "announcements@example.com";

/// Encode a blank image of the given size
pub fn encode_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, format)
        .unwrap_or_else(|e| panic!("Failed to encode {:?}: {}", format, e));
    buf.into_inner()
}

pub fn png_upload(name: &str, width: u32, height: u32) -> UploadedFile {
    UploadedFile::new(
        name,
        Some("image/png".to_string()),
        encode_image(width, height, ImageFormat::Png),
    )
}

pub fn jpeg_upload(name: &str, width: u32, height: u32) -> UploadedFile {
    UploadedFile::new(
        name,
        Some("image/jpeg".to_string()),
        encode_image(width, height, ImageFormat::Jpeg),
    )
}

pub fn text_upload(name: &str) -> UploadedFile {
    UploadedFile::new(name, Some("text/plain".to_string()), b"meeting notes".to_vec())
}

/// The "Chapel Talk" form: 2025-07-16 to 2025-07-23, chapel only
pub fn chapel_talk_form() -> SubmissionForm {
    SubmissionForm {
        title: "Chapel Talk".to_string(),
        email: "test@example.com".to_string(),
        description: "Guest speaker in the chapel".to_string(),
        start_date: "2025-07-16".to_string(),
        end_date: "2025-07-23".to_string(),
        chapel: Some("on".to_string()),
        praise: None,
    }
}

/// One delivered message as seen by the sender
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub raw: Vec<u8>,
    pub from: String,
    pub to: Vec<String>,
}

/// Email sender double that records every message
#[derive(Default, Clone)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail_with: Option<String>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every delivery fails with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Arc::default(),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, AnnounceError> {
        if let Some(reason) = &self.fail_with {
            return Err(AnnounceError::EmailDelivery(reason.clone()));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(SentEmail {
            raw: raw_email.to_vec(),
            from: from.to_string(),
            to: to.to_vec(),
        });
        Ok(format!("test-{}", sent.len()))
    }
}

/// A wired handler over an in-memory database and a temporary media root
pub struct TestApp {
    pub handler: SubmissionHandler,
    pub store: Arc<dyn SubmissionStore>,
    pub media: Arc<dyn MediaStorage>,
    pub sender: RecordingEmailSender,
    pub media_dir: TempDir,
}

impl TestApp {
    pub async fn new(policy: RecipientPolicy) -> Self {
        Self::with_sender(policy, RecordingEmailSender::new()).await
    }

    pub async fn with_sender(policy: RecipientPolicy, sender: RecordingEmailSender) -> Self {
        let media_dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn SubmissionStore> = Arc::new(SqliteStore::in_memory().await.unwrap());
        let media: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(media_dir.path()));

        let handler = SubmissionHandler::new(
            store.clone(),
            media.clone(),
            Arc::new(sender.clone()),
            policy,
            TEST_FROM,
        );

        Self {
            handler,
            store,
            media,
            sender,
            media_dir,
        }
    }

    pub async fn add_contact(&self, name: &str, email: &str, chapel: bool, praise: bool) {
        self.store
            .create_contact(&NewContact {
                name: name.to_string(),
                email: email.to_string(),
                is_chapel: chapel,
                is_praise: praise,
            })
            .await
            .unwrap();
    }

    /// Files currently stored under the slide upload directory
    pub fn stored_media_files(&self) -> Vec<String> {
        list_files(&self.media_dir.path().join("announcements"))
    }
}

fn list_files(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}
