/// Submission orchestrator: validate, persist, process slides, then roll back or notify
use crate::email::NotificationComposer;
use crate::error::AnnounceError;
use crate::forms::{FormValidationError, SubmissionForm};
use crate::handlers::state::SubmissionState;
use crate::models::{NewSubmission, Slide, Submission, SubmissionSummary, UploadedFile};
use crate::routing::{RecipientPolicy, RecipientResolver};
use crate::services::{EmailSender, MediaStorage, SubmissionStore};
use crate::slides::{SlideBatch, SlideProcessor};
use crate::utils::logging::{redact_recipients, redact_subject};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

/// What happened to the notification of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent { message_id: String },
    /// No contact matched the recipient policy
    Skipped,
    Failed { reason: String },
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Form rejected; nothing was stored
    Invalid { errors: FormValidationError },
    /// At least one slide was rejected; the submission was removed again
    RolledBack { errors: FormValidationError },
    Notified {
        submission: Submission,
        slides: Vec<Slide>,
        delivery: Delivery,
    },
}

impl SubmissionOutcome {
    pub fn state(&self) -> SubmissionState {
        match self {
            Self::Invalid { .. } => SubmissionState::Rejected,
            Self::RolledBack { .. } => SubmissionState::RolledBack,
            Self::Notified { .. } => SubmissionState::Notified,
        }
    }

    /// Errors to show on the re-rendered form, if any
    pub fn errors(&self) -> Option<&FormValidationError> {
        match self {
            Self::Invalid { errors } | Self::RolledBack { errors } => Some(errors),
            Self::Notified { .. } => None,
        }
    }
}

pub struct SubmissionHandler {
    store: Arc<dyn SubmissionStore>,
    media: Arc<dyn MediaStorage>,
    sender: Arc<dyn EmailSender>,
    processor: SlideProcessor,
    resolver: RecipientResolver,
    composer: NotificationComposer,
}

impl SubmissionHandler {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        media: Arc<dyn MediaStorage>,
        sender: Arc<dyn EmailSender>,
        policy: RecipientPolicy,
        email_from: impl Into<String>,
    ) -> Self {
        Self {
            processor: SlideProcessor::new(store.clone(), media.clone()),
            resolver: RecipientResolver::new(store.clone(), policy),
            composer: NotificationComposer::new(email_from),
            store,
            media,
            sender,
        }
    }

    pub fn store(&self) -> &Arc<dyn SubmissionStore> {
        &self.store
    }

    pub fn media(&self) -> &Arc<dyn MediaStorage> {
        &self.media
    }

    /// Run one submission request end to end
    ///
    /// Either the submission and all of its slides are kept and a
    /// notification is attempted, or nothing of it remains.
    pub async fn submit(
        &self,
        form: &SubmissionForm,
        files: &[UploadedFile],
    ) -> Result<SubmissionOutcome, AnnounceError> {
        let state = SubmissionState::Received;

        let cleaned = match form.clean() {
            Ok(cleaned) => cleaned,
            Err(errors) => {
                state.transition(SubmissionState::Rejected)?;
                info!(error_count = errors.len(), "Submission form rejected");
                return Ok(SubmissionOutcome::Invalid { errors });
            }
        };
        let state = state.transition(SubmissionState::FormValidated)?;

        let submission = self.store.create_submission(&cleaned).await?;
        let state = state.transition(SubmissionState::Persisted)?;

        info!(
            submission_id = submission.id,
            title = %redact_subject(&submission.title),
            slide_count = files.len(),
            "Submission persisted"
        );

        let batch = match self.processor.process(&submission, files).await {
            Ok(batch) => batch,
            Err(e) => {
                error!(submission_id = submission.id, error = %e, "Slide processing failed");
                state.transition(SubmissionState::RolledBack)?;
                self.discard_quietly(submission.id).await;
                return Err(e);
            }
        };
        let state = state.transition(SubmissionState::SlidesProcessed)?;

        if batch.has_errors() {
            state.transition(SubmissionState::RolledBack)?;
            return self.rollback(&submission, batch).await;
        }

        let delivery = match self.notify(&submission, &cleaned, files).await {
            Ok(delivery) => delivery,
            Err(e) => {
                error!(submission_id = submission.id, error = %e, "Notification failed");
                state.transition(SubmissionState::RolledBack)?;
                self.discard_quietly(submission.id).await;
                return Err(e);
            }
        };
        state.transition(SubmissionState::Notified)?;

        Ok(SubmissionOutcome::Notified {
            submission,
            slides: batch.slides,
            delivery,
        })
    }

    /// Remove a submission, its slides and their media files
    ///
    /// Returns the removed slides, or `None` if the submission did not exist.
    pub async fn delete_submission(&self, id: i64) -> Result<Option<Vec<Slide>>, AnnounceError> {
        let Some(slides) = self.store.delete_submission(id).await? else {
            return Ok(None);
        };

        for slide in &slides {
            if let Err(e) = self.media.delete(&slide.image).await {
                warn!(path = %slide.image, error = %e, "Failed to remove slide file");
            }
        }

        info!(submission_id = id, slides = slides.len(), "Submission deleted");
        Ok(Some(slides))
    }

    /// Admin listing, most recent start date first
    pub async fn summaries(&self, today: NaiveDate) -> Result<Vec<SubmissionSummary>, AnnounceError> {
        let submissions = self.store.list_submissions().await?;
        let mut summaries = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let slides = self.store.list_slides(submission.id).await?;
            summaries.push(SubmissionSummary::new(submission, slides, today));
        }
        Ok(summaries)
    }

    async fn rollback(
        &self,
        submission: &Submission,
        batch: SlideBatch,
    ) -> Result<SubmissionOutcome, AnnounceError> {
        let removed = self.delete_submission(submission.id).await?;

        warn!(
            submission_id = submission.id,
            kept_slides = batch.slides.len(),
            removed_slides = removed.map(|s| s.len()).unwrap_or_default(),
            rejected = batch.errors.len(),
            "Submission rolled back"
        );

        let mut errors = FormValidationError::new();
        for message in batch.errors {
            errors.add_non_field(message);
        }

        Ok(SubmissionOutcome::RolledBack { errors })
    }

    async fn discard_quietly(&self, id: i64) {
        if let Err(e) = self.delete_submission(id).await {
            error!(submission_id = id, error = %e, "Rollback failed");
        }
    }

    async fn notify(
        &self,
        submission: &Submission,
        cleaned: &NewSubmission,
        files: &[UploadedFile],
    ) -> Result<Delivery, AnnounceError> {
        let recipients = self.resolver.resolve(&submission.audiences()).await?;

        if recipients.is_empty() {
            warn!(
                submission_id = submission.id,
                policy = %self.resolver.policy(),
                "No recipients configured, notification skipped"
            );
            return Ok(Delivery::Skipped);
        }

        let notification = self.composer.compose(cleaned, recipients, files)?;
        let raw = self.composer.render(&notification)?;

        match self
            .sender
            .send_raw_email(&raw, self.composer.from_address(), &notification.to)
            .await
        {
            Ok(message_id) => {
                info!(
                    submission_id = submission.id,
                    message_id = %message_id,
                    to = %redact_recipients(&notification.to),
                    attachments = notification.attachments.len(),
                    "Notification sent"
                );
                Ok(Delivery::Sent { message_id })
            }
            Err(AnnounceError::EmailDelivery(reason)) => {
                error!(
                    submission_id = submission.id,
                    error = %reason,
                    "Notification delivery failed, submission kept"
                );
                Ok(Delivery::Failed { reason })
            }
            Err(e) => Err(e),
        }
    }
}
