/// Slide processing: validate each upload, persist the ones that pass
use crate::error::AnnounceError;
use crate::models::{RewindableSource, Slide, Submission, UploadedFile};
use crate::services::{MediaStorage, SubmissionStore};
use crate::slides::validator::validate_slide;
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

/// Slides created for one submission request, plus per-file errors
///
/// The batch is the unit of rollback: if any file failed, every slide in
/// it is discarded together with the submission.
#[derive(Debug, Default)]
pub struct SlideBatch {
    pub slides: Vec<Slide>,
    pub errors: Vec<String>,
}

impl SlideBatch {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct SlideProcessor {
    store: Arc<dyn SubmissionStore>,
    media: Arc<dyn MediaStorage>,
}

impl SlideProcessor {
    pub fn new(store: Arc<dyn SubmissionStore>, media: Arc<dyn MediaStorage>) -> Self {
        Self { store, media }
    }

    /// Validate and persist every file independently
    ///
    /// Valid slides are stored immediately, even when a later file fails.
    pub async fn process(
        &self,
        submission: &Submission,
        files: &[UploadedFile],
    ) -> Result<SlideBatch, AnnounceError> {
        let mut batch = SlideBatch::default();

        for file in files {
            if let Err(rejection) = validate_slide(file) {
                warn!(
                    submission_id = submission.id,
                    filename = %file.filename,
                    reason = ?rejection,
                    "Slide rejected"
                );
                batch.errors.push(format!("{}: {}", file.filename, rejection));
                continue;
            }

            let slide = self.persist(submission, file).await?;
            batch.slides.push(slide);
        }

        info!(
            submission_id = submission.id,
            accepted = batch.slides.len(),
            rejected = batch.errors.len(),
            "Processed slides"
        );

        Ok(batch)
    }

    async fn persist(
        &self,
        submission: &Submission,
        file: &UploadedFile,
    ) -> Result<Slide, AnnounceError> {
        let mut data = Vec::with_capacity(file.len());
        file.open().read_to_end(&mut data)?;

        let path = self.media.save(&file.filename, &data).await?;

        match self.store.create_slide(submission.id, &path).await {
            Ok(slide) => Ok(slide),
            Err(e) => {
                // The row never existed, so cascade cleanup won't find this file
                if let Err(cleanup) = self.media.delete(&path).await {
                    warn!(path = %path, error = %cleanup, "Failed to remove orphaned slide file");
                }
                Err(e)
            }
        }
    }
}
