/// Server-rendered pages
use announce_core::forms::submission::{
    FIELD_DESCRIPTION, FIELD_EMAIL, FIELD_END_DATE, FIELD_START_DATE, FIELD_TITLE,
};
use announce_core::forms::{FormValidationError, SubmissionForm};
use askama::Template;

#[derive(Template)]
#[template(path = "submission.html")]
pub struct SubmissionTemplate {
    pub page_title: &'static str,
    pub title: String,
    pub email: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub chapel: bool,
    pub praise: bool,
    pub non_field_errors: Vec<String>,
    pub title_errors: Vec<String>,
    pub email_errors: Vec<String>,
    pub description_errors: Vec<String>,
    pub start_date_errors: Vec<String>,
    pub end_date_errors: Vec<String>,
}

impl SubmissionTemplate {
    /// Render `form` as posted, with any errors next to their fields
    pub fn new(form: &SubmissionForm, errors: Option<&FormValidationError>) -> Self {
        let field = |name: &str| {
            errors
                .map(|e| e.field(name).to_vec())
                .unwrap_or_default()
        };

        Self {
            page_title: "Submit an Announcement",
            title: form.title.clone(),
            email: form.email.clone(),
            description: form.description.clone(),
            start_date: form.start_date.clone(),
            end_date: form.end_date.clone(),
            chapel: form.chapel_checked(),
            praise: form.praise_checked(),
            non_field_errors: errors
                .map(|e| e.non_field_errors().to_vec())
                .unwrap_or_default(),
            title_errors: field(FIELD_TITLE),
            email_errors: field(FIELD_EMAIL),
            description_errors: field(FIELD_DESCRIPTION),
            start_date_errors: field(FIELD_START_DATE),
            end_date_errors: field(FIELD_END_DATE),
        }
    }
}

#[derive(Template)]
#[template(path = "faq.html")]
pub struct FaqTemplate {
    pub page_title: &'static str,
}

impl Default for FaqTemplate {
    fn default() -> Self {
        Self {
            page_title: "Frequently Asked Questions",
        }
    }
}
