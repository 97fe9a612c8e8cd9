/// Announcement submission form endpoints
use announce_core::constants::{SLIDES_FIELD, SUCCESS_REDIRECT};
use announce_core::forms::SubmissionForm;
use announce_core::handlers::SubmissionOutcome;
use announce_core::models::UploadedFile;
use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::{context::ApiContext, error::ApiError, templates::SubmissionTemplate};

/// Empty submission form
pub async fn form() -> Result<Html<String>, ApiError> {
    let page = SubmissionTemplate::new(&SubmissionForm::initial(), None).render()?;
    Ok(Html(page))
}

/// Handle a posted submission
///
/// Redirects on success; otherwise re-renders the form with its errors.
pub async fn submit(
    State(ctx): State<Arc<ApiContext>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let (form, files) = read_submission(multipart).await?;

    let outcome = ctx.submissions.submit(&form, &files).await?;

    match outcome {
        SubmissionOutcome::Notified {
            submission,
            delivery,
            ..
        } => {
            info!(
                submission_id = submission.id,
                delivery = ?delivery,
                "Submission accepted"
            );
            Ok(Redirect::to(SUCCESS_REDIRECT).into_response())
        }
        rejected => {
            let page = SubmissionTemplate::new(&form, rejected.errors()).render()?;
            Ok(Html(page).into_response())
        }
    }
}

/// Split a multipart body into form fields and slide files
///
/// File inputs left empty by the browser arrive as a part with no filename
/// and no content; those are skipped.
async fn read_submission(
    mut multipart: Multipart,
) -> Result<(SubmissionForm, Vec<UploadedFile>), ApiError> {
    let mut form = SubmissionForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == SLIDES_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;

            if filename.is_empty() && data.is_empty() {
                continue;
            }
            files.push(UploadedFile::new(filename, content_type, data));
        } else {
            let value = field.text().await?;
            form.set_field(&name, value);
        }
    }

    Ok((form, files))
}
