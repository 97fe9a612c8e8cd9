/// Submission and slide models
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recipient group an announcement is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Chapel,
    Praise,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chapel => "chapel",
            Self::Praise => "praise",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted announcement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub title: String,
    pub email: Option<String>,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub chapel: bool,
    pub praise: bool,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Audiences selected on this submission, chapel first
    pub fn audiences(&self) -> Vec<Audience> {
        audiences_for(self.chapel, self.praise)
    }

    /// True when `today` falls within the announcement window (by date)
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.start_date.date_naive() <= today && today <= self.end_date.date_naive()
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Validated submission fields, ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub title: String,
    pub email: Option<String>,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub chapel: bool,
    pub praise: bool,
}

impl NewSubmission {
    pub fn audiences(&self) -> Vec<Audience> {
        audiences_for(self.chapel, self.praise)
    }
}

fn audiences_for(chapel: bool, praise: bool) -> Vec<Audience> {
    let mut audiences = Vec::with_capacity(2);
    if chapel {
        audiences.push(Audience::Chapel);
    }
    if praise {
        audiences.push(Audience::Praise);
    }
    audiences
}

/// One stored slide image belonging to a submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slide {
    pub id: i64,
    pub submission_id: i64,
    /// Media path relative to the media root
    pub image: String,
}

/// Admin listing row for a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub chapel: bool,
    pub praise: bool,
    pub is_active: bool,
    pub slides: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SubmissionSummary {
    pub fn new(submission: Submission, slides: Vec<Slide>, today: NaiveDate) -> Self {
        let is_active = submission.is_active_on(today);
        Self {
            id: submission.id,
            title: submission.title,
            email: submission.email,
            description: submission.description,
            start_date: submission.start_date.date_naive(),
            end_date: submission.end_date.date_naive(),
            chapel: submission.chapel,
            praise: submission.praise,
            is_active,
            slides: slides.into_iter().map(|s| s.image).collect(),
            created_at: submission.created_at,
        }
    }
}
