/// Static FAQ page
use askama::Template;
use axum::response::Html;

use crate::{error::ApiError, templates::FaqTemplate};

pub async fn handler() -> Result<Html<String>, ApiError> {
    Ok(Html(FaqTemplate::default().render()?))
}
