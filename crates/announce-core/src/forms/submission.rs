/// Announcement submission form
use crate::constants::{
    DATE_INPUT_FORMAT, DATETIME_INPUT_FORMATS, MAX_EMAIL_LENGTH, MAX_TITLE_LENGTH,
    MSG_END_BEFORE_START, MSG_INVALID_DATETIME, MSG_INVALID_EMAIL, MSG_NO_AUDIENCE, MSG_REQUIRED,
};
use crate::forms::errors::FormValidationError;
use crate::models::NewSubmission;
use crate::utils::validation::is_valid_email;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_START_DATE: &str = "start_date";
pub const FIELD_END_DATE: &str = "end_date";
pub const FIELD_CHAPEL: &str = "chapel";
pub const FIELD_PRAISE: &str = "praise";

/// Raw submission form as posted by the browser
///
/// Checkboxes keep their raw value so a re-rendered form shows what was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub chapel: Option<String>,
    #[serde(default)]
    pub praise: Option<String>,
}

impl SubmissionForm {
    /// Blank form shown on first visit, with praise pre-selected
    pub fn initial() -> Self {
        Self {
            praise: Some("on".to_string()),
            ..Self::default()
        }
    }

    /// Assign a posted field by name; unknown names are ignored
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            FIELD_TITLE => self.title = value,
            FIELD_EMAIL => self.email = value,
            FIELD_DESCRIPTION => self.description = value,
            FIELD_START_DATE => self.start_date = value,
            FIELD_END_DATE => self.end_date = value,
            FIELD_CHAPEL => self.chapel = Some(value),
            FIELD_PRAISE => self.praise = Some(value),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    pub fn chapel_checked(&self) -> bool {
        is_checked(self.chapel.as_deref())
    }

    pub fn praise_checked(&self) -> bool {
        is_checked(self.praise.as_deref())
    }

    /// Validate every field and build the submission to persist
    pub fn clean(&self) -> Result<NewSubmission, FormValidationError> {
        let mut errors = FormValidationError::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add(FIELD_TITLE, MSG_REQUIRED);
        } else if title.chars().count() > MAX_TITLE_LENGTH {
            errors.add(FIELD_TITLE, too_long(MAX_TITLE_LENGTH, title));
        }

        let email = self.email.trim();
        if !email.is_empty() {
            if email.chars().count() > MAX_EMAIL_LENGTH {
                errors.add(FIELD_EMAIL, too_long(MAX_EMAIL_LENGTH, email));
            } else if !is_valid_email(email) {
                errors.add(FIELD_EMAIL, MSG_INVALID_EMAIL);
            }
        }

        let start_date = clean_datetime(&mut errors, FIELD_START_DATE, &self.start_date);
        let end_date = clean_datetime(&mut errors, FIELD_END_DATE, &self.end_date);

        let chapel = self.chapel_checked();
        let praise = self.praise_checked();
        if !chapel && !praise {
            errors.add_non_field(MSG_NO_AUDIENCE);
        }

        if let (Some(start), Some(end)) = (start_date, end_date)
            && end < start
        {
            errors.add_non_field(MSG_END_BEFORE_START);
        }

        let description = self.description.trim();

        match (start_date, end_date) {
            (Some(start_date), Some(end_date)) => errors.into_result(NewSubmission {
                title: title.to_string(),
                email: non_empty(email),
                description: non_empty(description),
                start_date,
                end_date,
                chapel,
                praise,
            }),
            _ => Err(errors),
        }
    }
}

/// Checkbox semantics: absent and the usual false spellings are unchecked
pub fn is_checked(value: Option<&str>) -> bool {
    !matches!(
        value.map(str::trim),
        None | Some("") | Some("false") | Some("False") | Some("0") | Some("off")
    )
}

/// Parse a date or date/time input; date-only values mean UTC midnight
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|dt| dt.and_utc())
}

fn clean_datetime(
    errors: &mut FormValidationError,
    field: &str,
    raw: &str,
) -> Option<DateTime<Utc>> {
    if raw.trim().is_empty() {
        errors.add(field, MSG_REQUIRED);
        return None;
    }

    let parsed = parse_datetime(raw);
    if parsed.is_none() {
        errors.add(field, MSG_INVALID_DATETIME);
    }
    parsed
}

fn too_long(limit: usize, value: &str) -> String {
    format!(
        "Ensure this value has at most {} characters (it has {}).",
        limit,
        value.chars().count()
    )
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
