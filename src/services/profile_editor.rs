//! Profile edit state machine
//!
//! ```text
//! Viewing --edit--> Editing --submit (valid)--> Saving --ok--> Viewing
//!    ^                 |  ^                        |
//!    +-----cancel------+  +--------failure---------+
//! ```
//!
//! The editor itself is synchronous so it can live behind a plain mutex; the
//! backend round trip happens in [`submit`] between [`ProfileEditor::begin_save`]
//! and [`ProfileEditor::finish_save`] without the lock held.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, instrument, warn, Instrument};

use super::attachment::{AttachmentRejected, AttachmentSlot, ImageAttachment, ImageUpload};
use super::backend::{with_timeout, BackendError, BackendResult, Backends};
use crate::domain::{CustomerProfile, DraftPatch, ProfileDraft};
use crate::validation::{profile_schema, validate_profile, ValidationErrors};

pub const SUCCESS_MESSAGE: &str = "Profile updated successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to save profile. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    Viewing,
    Editing,
    Saving,
}

impl std::fmt::Display for EditorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Viewing => write!(f, "viewing"),
            Self::Editing => write!(f, "editing"),
            Self::Saving => write!(f, "saving"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("cannot {action} while {mode}")]
    NotAllowed {
        mode: EditorMode,
        action: &'static str,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Rejected(#[from] AttachmentRejected),

    #[error("Failed to save profile. Please try again.")]
    Commit(#[source] BackendError),
}

/// Time-bounded notice shown after a successful save
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: &'static str,
    pub shown_at: DateTime<Utc>,
}

/// Everything a save needs, captured when Saving is entered
#[derive(Debug, Clone)]
pub struct SaveTicket {
    pub profile: CustomerProfile,
    pub image: Option<ImageAttachment>,
}

pub struct ProfileEditor {
    mode: EditorMode,
    snapshot: CustomerProfile,
    draft: Option<ProfileDraft>,
    attachment: AttachmentSlot,
    success: Option<Notice>,
    error: Option<&'static str>,
    notice_ttl: TimeDelta,
}

impl ProfileEditor {
    pub fn new(snapshot: CustomerProfile, notice_ttl: Duration) -> Self {
        Self {
            mode: EditorMode::Viewing,
            snapshot,
            draft: None,
            attachment: AttachmentSlot::default(),
            success: None,
            error: None,
            notice_ttl: TimeDelta::from_std(notice_ttl).unwrap_or(TimeDelta::seconds(3)),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Last committed profile
    pub fn snapshot(&self) -> &CustomerProfile {
        &self.snapshot
    }

    pub fn draft(&self) -> Option<&ProfileDraft> {
        self.draft.as_ref()
    }

    pub fn attachment(&self) -> &AttachmentSlot {
        &self.attachment
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    /// Success notice, if it is still within its display window at `now`
    pub fn success_notice(&self, now: DateTime<Utc>) -> Option<&'static str> {
        self.success
            .as_ref()
            .filter(|n| now - n.shown_at < self.notice_ttl)
            .map(|n| n.message)
    }

    /// Drop a success notice whose window has passed
    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) {
        if self.success_notice(now).is_none() {
            self.success = None;
        }
    }

    /// Per-field errors for the current draft, for on-change feedback
    pub fn live_errors(&self, today: NaiveDate) -> Option<ValidationErrors> {
        let draft = self.draft.as_ref()?;
        profile_schema(today).validate(draft).err()
    }

    fn require(&self, mode: EditorMode, action: &'static str) -> Result<(), EditorError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(EditorError::NotAllowed {
                mode: self.mode,
                action,
            })
        }
    }

    /// Viewing -> Editing, seeding the draft from the snapshot
    pub fn begin_edit(&mut self) -> Result<&ProfileDraft, EditorError> {
        self.require(EditorMode::Viewing, "edit")?;
        self.mode = EditorMode::Editing;
        self.error = None;
        info!("Profile edit started");
        Ok(&*self.draft.insert(ProfileDraft::from(&self.snapshot)))
    }

    pub fn update_draft(&mut self, patch: DraftPatch) -> Result<&ProfileDraft, EditorError> {
        self.require(EditorMode::Editing, "change fields")?;
        let draft = self
            .draft
            .get_or_insert_with(|| ProfileDraft::from(&self.snapshot));
        draft.apply(patch);
        Ok(&*draft)
    }

    /// Editing -> Viewing, discarding the draft and any pending image
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        self.require(EditorMode::Editing, "cancel")?;
        self.draft = None;
        self.attachment.clear();
        self.error = None;
        self.mode = EditorMode::Viewing;
        info!("Profile edit cancelled");
        Ok(())
    }

    pub fn attach(&mut self, upload: ImageUpload) -> Result<&ImageAttachment, EditorError> {
        self.require(EditorMode::Editing, "attach an image")?;
        match self.attachment.select(upload) {
            Ok(accepted) => {
                info!(
                    file_name = %accepted.file_name,
                    size = accepted.size(),
                    "Avatar image selected"
                );
                Ok(accepted)
            }
            Err(rejected) => {
                warn!(reason = %rejected, "Avatar image rejected");
                Err(rejected.into())
            }
        }
    }

    pub fn remove_attachment(&mut self) -> Result<(), EditorError> {
        self.require(EditorMode::Editing, "remove the image")?;
        self.attachment.clear();
        Ok(())
    }

    /// Editing -> Saving when the draft validates; otherwise stays Editing
    pub fn begin_save(&mut self, today: NaiveDate) -> Result<SaveTicket, EditorError> {
        self.require(EditorMode::Editing, "submit")?;
        let draft = self
            .draft
            .get_or_insert_with(|| ProfileDraft::from(&self.snapshot));

        let profile = validate_profile(draft, self.snapshot.avatar.clone(), today)?;
        self.mode = EditorMode::Saving;
        self.error = None;
        info!("Profile save started");

        Ok(SaveTicket {
            profile,
            image: self.attachment.packaged(),
        })
    }

    /// Saving -> Viewing on success (atomic snapshot swap), Saving -> Editing
    /// on failure with the draft kept.
    pub fn finish_save(
        &mut self,
        result: BackendResult<CustomerProfile>,
        now: DateTime<Utc>,
    ) -> Result<&CustomerProfile, EditorError> {
        self.require(EditorMode::Saving, "finish saving")?;

        match result {
            Ok(committed) => {
                self.snapshot = committed;
                self.draft = None;
                self.attachment.clear();
                self.success = Some(Notice {
                    message: SUCCESS_MESSAGE,
                    shown_at: now,
                });
                self.mode = EditorMode::Viewing;
                info!("Profile saved");
                Ok(&self.snapshot)
            }
            Err(e) => {
                error!(error = %e, "Error saving profile");
                self.error = Some(FAILURE_MESSAGE);
                self.mode = EditorMode::Editing;
                Err(EditorError::Commit(e))
            }
        }
    }
}

async fn commit(
    ticket: SaveTicket,
    backends: &Backends,
    timeout: Duration,
) -> BackendResult<CustomerProfile> {
    let mut profile = ticket.profile;
    if let Some(image) = &ticket.image {
        let reference = with_timeout(timeout, backends.images.upload_image(image)).await?;
        profile.avatar = Some(reference);
    }
    with_timeout(timeout, backends.profiles.save_profile(profile)).await
}

/// Run a full submit: validate and enter Saving, upload and save through
/// `backends`, then settle the transition.
///
/// The round trip and the settling run on their own task, so the editor
/// leaves Saving even if the caller stops waiting.
#[instrument(skip(editor, backends))]
pub async fn submit(
    editor: &Arc<Mutex<ProfileEditor>>,
    backends: &Backends,
    timeout: Duration,
    today: NaiveDate,
) -> Result<CustomerProfile, EditorError> {
    let ticket = {
        let mut guard = editor.lock();
        guard.begin_save(today)?
    };

    let save = {
        let editor = Arc::clone(editor);
        let backends = backends.clone();
        tokio::spawn(
            async move {
                let result = commit(ticket, &backends, timeout).await;
                let mut guard = editor.lock();
                guard.finish_save(result, Utc::now()).cloned()
            }
            .in_current_span(),
        )
    };

    match save.await {
        Ok(outcome) => outcome,
        Err(join_error) => {
            error!(error = %join_error, "Profile save task did not complete");
            let aborted = BackendError::Unavailable("save task aborted".to_string());
            let mut guard = editor.lock();
            guard.finish_save(Err(aborted), Utc::now()).cloned()
        }
    }
}
