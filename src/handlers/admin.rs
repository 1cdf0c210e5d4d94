use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::workflow::{EventForm, PosterUpload};

/// GET /api/admin/events - every event, published or not.
pub async fn events_list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = state.repository.list_all().await?;
    Ok(Json(json!({ "success": true, "data": events })))
}

/// POST /api/admin/events - create an event from a multipart form.
pub async fn event_create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_event_form(multipart).await?;
    let event = state.workflow.create(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": event })),
    ))
}

/// PUT /api/admin/events/:id - full replacement of the editable fields.
pub async fn event_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_event_form(multipart).await?;
    let event = state.workflow.update(id, form).await?;
    Ok(Json(json!({ "success": true, "data": event })))
}

/// DELETE /api/admin/events/:id - hard delete.
pub async fn event_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.workflow.delete(id).await?;
    Ok(Json(json!({ "success": true, "data": null })))
}

/// Pull the admin event form out of a multipart submission. Unknown fields
/// are ignored; the workflow does the actual validation.
async fn read_event_form(mut multipart: Multipart) -> Result<EventForm, ApiError> {
    let mut form = EventForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "posterFile" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("unreadable poster payload: {}", e)))?;
            if !bytes.is_empty() {
                form.poster_file = Some(PosterUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::bad_request(format!("unreadable field '{}': {}", name, e)))?;

        match name.as_str() {
            "title" => form.title = Some(value),
            "description" => form.description = Some(value),
            "tag" => form.tag = Some(value),
            "posterUrl" => form.poster_url = Some(value),
            "ticketsUrl" => form.tickets_url = Some(value),
            "dateTime" => form.date_time = Some(value),
            "isPublished" => form.is_published = Some(value),
            _ => {}
        }
    }

    Ok(form)
}
