/// Contact management endpoints
use announce_core::forms::ContactForm;
use announce_core::models::Contact;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::{context::ApiContext, error::ApiError};

pub async fn list(State(ctx): State<Arc<ApiContext>>) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(ctx.store.list_contacts().await?))
}

pub async fn create(
    State(ctx): State<Arc<ApiContext>>,
    Json(form): Json<ContactForm>,
) -> Result<Response, ApiError> {
    let new = match form.clean() {
        Ok(new) => new,
        Err(errors) => {
            let body = Json(json!({
                "error": "Invalid contact",
                "fields": errors.fields(),
            }));
            return Ok((StatusCode::BAD_REQUEST, body).into_response());
        }
    };

    let contact = ctx.store.create_contact(&new).await?;
    info!(
        contact_id = contact.id,
        chapel = contact.is_chapel,
        praise = contact.is_praise,
        "Contact created"
    );

    Ok((StatusCode::CREATED, Json(contact)).into_response())
}

pub async fn delete(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if ctx.store.delete_contact(id).await? {
        info!(contact_id = id, "Contact deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Contact {} not found", id)))
    }
}
