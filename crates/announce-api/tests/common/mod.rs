//! Common test utilities and helpers for HTTP tests
#![allow(dead_code)]

use announce_api::ApiContext;
use announce_core::AppConfig;
use announce_core::error::AnnounceError;
use announce_core::models::NewContact;
use announce_core::services::{
    EmailSender, LocalMediaStorage, MediaStorage, SqliteStore, SubmissionStore,
};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----announce-test-boundary";

/// Raw messages handed to the sender
#[derive(Default, Clone)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<(Vec<u8>, Vec<String>)>>>,
}

impl RecordingEmailSender {
    pub fn sent(&self) -> Vec<(Vec<u8>, Vec<String>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        _from: &str,
        to: &[String],
    ) -> Result<String, AnnounceError> {
        self.sent
            .lock()
            .unwrap()
            .push((raw_email.to_vec(), to.to_vec()));
        Ok("test-message".to_string())
    }
}

pub struct TestServer {
    pub router: Router,
    pub ctx: Arc<ApiContext>,
    pub store: Arc<dyn SubmissionStore>,
    pub sender: RecordingEmailSender,
    pub media_dir: TempDir,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    pub async fn with_admin() -> Self {
        Self::with_config(AppConfig {
            admin_api: true,
            ..AppConfig::default()
        })
        .await
    }

    pub async fn with_config(mut config: AppConfig) -> Self {
        let media_dir = tempfile::tempdir().unwrap();
        config.media_root = media_dir.path().to_path_buf();

        let store: Arc<dyn SubmissionStore> = Arc::new(SqliteStore::in_memory().await.unwrap());
        let media: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(media_dir.path()));
        let sender = RecordingEmailSender::default();

        let ctx = ApiContext::from_parts(config, store.clone(), media, Arc::new(sender.clone()));
        let router = announce_api::router(ctx.clone());

        Self {
            router,
            ctx,
            store,
            sender,
            media_dir,
        }
    }

    pub async fn add_contact(&self, email: &str, chapel: bool, praise: bool) {
        self.store
            .create_contact(&NewContact {
                name: email.to_string(),
                email: email.to_string(),
                is_chapel: chapel,
                is_praise: praise,
            })
            .await
            .unwrap();
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_multipart(&self, body: Vec<u8>) -> Response<Body> {
        let request = Request::post("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

/// Hand-built multipart/form-data body
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, filename, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.buf
    }
}

/// The Chapel Talk form fields, chapel only
pub fn chapel_talk() -> MultipartBody {
    MultipartBody::new()
        .text("title", "Chapel Talk")
        .text("email", "test@example.com")
        .text("description", "Guest speaker")
        .text("start_date", "2025-07-16")
        .text("end_date", "2025-07-23")
        .text("chapel", "on")
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
