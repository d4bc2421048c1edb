//! Avatar image attachment
//!
//! Screens an uploaded file against the accepted image types and size cap and
//! produces a data-URL preview that a client can render without a round trip.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

/// Largest accepted image, inclusive
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted MIME types
pub const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentRejected {
    #[error("Please upload a valid image file (JPEG, PNG, GIF, or WebP); got {0}")]
    UnsupportedType(String),

    #[error("File size must be less than 5MB ({size} bytes given)")]
    TooLarge { size: usize, limit: usize },

    #[error("The selected file is empty")]
    Empty,
}

/// A file as received from the client
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An accepted image with its renderable preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview: String,
}

/// Metadata about the pending image, without the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentSummary {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
}

impl ImageAttachment {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn summary(&self) -> AttachmentSummary {
        AttachmentSummary {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size: self.size(),
        }
    }
}

impl ImageUpload {
    /// Check type and size, then build the preview
    pub fn accept(self) -> Result<ImageAttachment, AttachmentRejected> {
        let content_type = self.content_type.trim().to_lowercase();
        if !ACCEPTED_TYPES.contains(&content_type.as_str()) {
            return Err(AttachmentRejected::UnsupportedType(self.content_type));
        }
        if self.bytes.is_empty() {
            return Err(AttachmentRejected::Empty);
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AttachmentRejected::TooLarge {
                size: self.bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        let preview = format!("data:{};base64,{}", content_type, STANDARD.encode(&self.bytes));
        Ok(ImageAttachment {
            file_name: self.file_name,
            content_type,
            bytes: self.bytes,
            preview,
        })
    }
}

/// Pending image selection for the edit form
///
/// `epoch` advances every time the selection is cleared so the client knows
/// to reset its file input.
#[derive(Debug, Clone, Default)]
pub struct AttachmentSlot {
    current: Option<ImageAttachment>,
    epoch: u64,
}

impl AttachmentSlot {
    pub fn current(&self) -> Option<&ImageAttachment> {
        self.current.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.preview.as_str())
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replace the selection with `upload` if it is acceptable; a rejected
    /// file leaves the previous selection in place.
    pub fn select(&mut self, upload: ImageUpload) -> Result<&ImageAttachment, AttachmentRejected> {
        let accepted = upload.accept()?;
        Ok(&*self.current.insert(accepted))
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.epoch += 1;
    }

    /// Copy of the selection to send along with a save
    pub fn packaged(&self) -> Option<ImageAttachment> {
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: usize = 1024 * 1024;

    fn upload(content_type: &str, size: usize) -> ImageUpload {
        ImageUpload {
            file_name: "avatar".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0x89; size],
        }
    }

    #[test]
    fn six_mib_png_is_rejected() {
        let err = upload("image/png", 6 * MIB).accept().unwrap_err();
        assert_eq!(
            err,
            AttachmentRejected::TooLarge {
                size: 6 * MIB,
                limit: MAX_IMAGE_BYTES
            }
        );
    }

    #[test]
    fn bmp_is_rejected_by_type() {
        let err = upload("image/bmp", 2 * MIB).accept().unwrap_err();
        assert_eq!(err, AttachmentRejected::UnsupportedType("image/bmp".into()));
    }

    #[test]
    fn two_mib_png_gets_a_preview() {
        let accepted = upload("image/png", 2 * MIB).accept().unwrap();
        assert!(accepted.preview.starts_with("data:image/png;base64,"));
        assert!(accepted.preview.len() > "data:image/png;base64,".len());
        assert_eq!(accepted.size(), 2 * MIB);
    }

    #[test]
    fn exactly_five_mib_is_accepted() {
        assert!(upload("image/webp", MAX_IMAGE_BYTES).accept().is_ok());
        assert!(upload("image/webp", MAX_IMAGE_BYTES + 1).accept().is_err());
    }

    #[test]
    fn rejected_file_keeps_previous_selection() {
        let mut slot = AttachmentSlot::default();
        slot.select(upload("image/jpeg", 1024)).unwrap();
        let before = slot.preview().map(str::to_string);

        assert!(slot.select(upload("image/bmp", 1024)).is_err());
        assert_eq!(slot.preview().map(str::to_string), before);
        assert_eq!(slot.current().map(|a| a.content_type.as_str()), Some("image/jpeg"));
    }

    #[test]
    fn clearing_resets_selection_and_bumps_epoch() {
        let mut slot = AttachmentSlot::default();
        slot.select(upload("image/gif", 10)).unwrap();
        slot.clear();
        assert!(slot.current().is_none());
        assert!(slot.preview().is_none());
        assert_eq!(slot.epoch(), 1);
    }
}
