//! Projection for the customer profile screen

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::ProfileDraft;
use crate::services::attachment::AttachmentSummary;
use crate::services::profile_editor::{EditorMode, ProfileEditor};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileHeader {
    pub name: String,
    pub email: String,
    pub initials: String,
    pub service_badge: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarEditor {
    pub preview: Option<String>,
    pub pending: Option<AttachmentSummary>,
    pub can_remove: bool,
    /// Changes whenever the file input must be reset
    pub input_epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub mode: EditorMode,
    pub success_notice: Option<&'static str>,
    pub error_banner: Option<&'static str>,
    /// Header is only rendered outside edit mode
    pub header: Option<ProfileHeader>,
    pub fields: ProfileDraft,
    pub fields_disabled: bool,
    pub field_errors: ValidationErrors,
    pub avatar: Option<AvatarEditor>,
    pub can_submit: bool,
    pub submitting: bool,
}

impl ProfileView {
    pub fn project(editor: &ProfileEditor, today: NaiveDate, now: DateTime<Utc>) -> Self {
        let mode = editor.mode();
        let snapshot = editor.snapshot();
        let editable = mode != EditorMode::Viewing;

        let header = (mode == EditorMode::Viewing).then(|| ProfileHeader {
            name: snapshot.name.clone(),
            email: snapshot.email.clone(),
            initials: snapshot.initials(),
            service_badge: format!("Frequent Service: {}", snapshot.preferred_service),
            phone: Some(snapshot.phone.clone()).filter(|p| !p.is_empty()),
            avatar_url: snapshot.avatar.as_ref().map(|a| a.url.clone()),
        });

        let avatar = editable.then(|| {
            let slot = editor.attachment();
            AvatarEditor {
                preview: slot.preview().map(str::to_string),
                pending: slot.current().map(|a| a.summary()),
                can_remove: slot.current().is_some(),
                input_epoch: slot.epoch(),
            }
        });

        let fields = editor
            .draft()
            .cloned()
            .unwrap_or_else(|| ProfileDraft::from(snapshot));

        Self {
            mode,
            success_notice: editor.success_notice(now),
            error_banner: editor.error_message(),
            header,
            fields,
            fields_disabled: mode != EditorMode::Editing,
            field_errors: editor.live_errors(today).unwrap_or_default(),
            avatar,
            can_submit: mode == EditorMode::Editing,
            submitting: mode == EditorMode::Saving,
        }
    }
}
