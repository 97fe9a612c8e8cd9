/// Uploaded slide files
use bytes::Bytes;
use lettre::message::header::ContentType;
use std::io::Cursor;

use crate::email::mime::detect_content_type;

/// A byte source that can be read from the beginning any number of times
///
/// Slides are read once to validate them and again to attach them to the
/// notification; every call to `open` starts at offset zero.
pub trait RewindableSource {
    /// Original name of the source, as supplied by the client
    fn name(&self) -> &str;

    /// Fresh reader positioned at the start of the content
    fn open(&self) -> Cursor<&[u8]>;
}

/// A file received in a submission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    content_type: Option<String>,
    data: Bytes,
}

impl UploadedFile {
    /// Declared content types that are not valid MIME types are discarded
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type
                .map(|ct| ct.trim().to_string())
                .filter(|ct| ContentType::parse(ct).is_ok()),
            data: data.into(),
        }
    }

    /// Declared content type, or one guessed from the filename
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or_else(|| detect_content_type(&self.filename))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl RewindableSource for UploadedFile {
    fn name(&self) -> &str {
        &self.filename
    }

    fn open(&self) -> Cursor<&[u8]> {
        Cursor::new(self.data.as_ref())
    }
}
