/// Lifecycle of one submission request
use crate::error::AnnounceError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Received,
    FormValidated,
    Persisted,
    SlidesProcessed,
    Rejected,
    RolledBack,
    Notified,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::FormValidated => "form_validated",
            Self::Persisted => "persisted",
            Self::SlidesProcessed => "slides_processed",
            Self::Rejected => "rejected",
            Self::RolledBack => "rolled_back",
            Self::Notified => "notified",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::RolledBack | Self::Notified)
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        use SubmissionState::*;

        matches!(
            (self, next),
            (Received, FormValidated)
                | (Received, Rejected)
                | (FormValidated, Persisted)
                | (Persisted, SlidesProcessed)
                // Infrastructure failures after insert unwind straight away
                | (Persisted, RolledBack)
                | (SlidesProcessed, RolledBack)
                | (SlidesProcessed, Notified)
        )
    }

    pub fn transition(self, next: Self) -> Result<Self, AnnounceError> {
        if self.can_transition_to(next) {
            tracing::debug!(from = %self, to = %next, "Submission state transition");
            Ok(next)
        } else {
            Err(AnnounceError::Validation(format!(
                "Illegal submission state transition: {} -> {}",
                self, next
            )))
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
