//! Customer profile routes
//!
//! Drive the profile edit state machine. Every route answers with the freshly
//! projected [`ProfileView`] so a client can re-render from a single payload.

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::DraftPatch;
use crate::error::{ApiError, ApiResult};
use crate::services::attachment::ImageUpload;
use crate::services::profile_editor::{self, ProfileEditor};
use crate::views::{ProfileView, Screen};

/// Multipart field carrying the avatar file
const IMAGE_FIELD: &str = "image";

fn render(state: &AppState, editor: &ProfileEditor) -> Screen<ProfileView> {
    Screen::new("profile", ProfileView::project(editor, state.today(), Utc::now()))
}

/// GET /profile
pub async fn get_profile(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut editor = state.profile.lock();
    editor.dismiss_expired(Utc::now());
    render(&state, &editor)
}

/// POST /profile/edit
pub async fn begin_edit(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let mut editor = state.profile.lock();
    editor.begin_edit()?;
    Ok(render(&state, &editor))
}

/// PATCH /profile/draft
pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<DraftPatch>,
) -> ApiResult<impl IntoResponse> {
    let mut editor = state.profile.lock();
    editor.update_draft(patch)?;
    Ok(render(&state, &editor))
}

/// POST /profile/cancel
pub async fn cancel_edit(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let mut editor = state.profile.lock();
    editor.cancel()?;
    Ok(render(&state, &editor))
}

async fn read_image(mut multipart: Multipart) -> ApiResult<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;

        return Ok(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::bad_request(format!(
        "Missing multipart field '{IMAGE_FIELD}'"
    )))
}

/// POST /profile/avatar
///
/// Select an avatar image. A rejected file leaves the previous selection.
pub async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let upload = read_image(multipart).await?;

    let mut editor = state.profile.lock();
    editor.attach(upload)?;
    Ok(render(&state, &editor))
}

/// DELETE /profile/avatar
pub async fn remove_avatar(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let mut editor = state.profile.lock();
    editor.remove_attachment()?;
    Ok(render(&state, &editor))
}

/// POST /profile/submit
///
/// Validate, then save through the profile store. While the save is in flight
/// the screen reports `saving` and refuses further edits.
pub async fn submit_profile(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    profile_editor::submit(
        &state.profile,
        &state.backends,
        state.settings.backend_timeout,
        state.today(),
    )
    .await?;

    let editor = state.profile.lock();
    Ok(render(&state, &editor))
}
