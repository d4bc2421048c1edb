//! Customer profile domain types
//!
//! A profile exists as a committed snapshot (`CustomerProfile`) and, while the
//! customer is editing, as a form-bound draft (`ProfileDraft`) whose fields are
//! all plain strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reference to an uploaded avatar image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub url: String,
}

/// Committed customer profile snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub email: String,
    pub address: String,
    pub google_map_link: Option<String>,
    pub phone: String,
    pub alternate_phone: Option<String>,
    pub dob: NaiveDate,
    pub preferred_service: String,
    pub preferred_time_slot: String,
    pub special_instructions: Option<String>,
    pub avatar: Option<ImageReference>,
}

impl Default for CustomerProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            address: "Delhi, India".to_string(),
            google_map_link: Some("https://maps.google.com".to_string()),
            phone: "9876543210".to_string(),
            alternate_phone: None,
            dob: NaiveDate::from_ymd_opt(1998, 1, 1).unwrap_or_default(),
            preferred_service: "Home Cleaning".to_string(),
            preferred_time_slot: "Morning (9 AM - 12 PM)".to_string(),
            special_instructions: Some("Please call before arriving.".to_string()),
            avatar: None,
        }
    }
}

impl CustomerProfile {
    /// First letter of the name for the avatar fallback
    pub fn initials(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// In-progress edit, bound to form fields
///
/// Optional fields use the empty string for "not present".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub address: String,
    pub google_map_link: String,
    pub phone: String,
    pub alternate_phone: String,
    pub dob: String,
    pub preferred_service: String,
    pub preferred_time_slot: String,
    pub special_instructions: String,
}

impl From<&CustomerProfile> for ProfileDraft {
    fn from(p: &CustomerProfile) -> Self {
        Self {
            name: p.name.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
            google_map_link: p.google_map_link.clone().unwrap_or_default(),
            phone: p.phone.clone(),
            alternate_phone: p.alternate_phone.clone().unwrap_or_default(),
            dob: p.dob.format("%Y-%m-%d").to_string(),
            preferred_service: p.preferred_service.clone(),
            preferred_time_slot: p.preferred_time_slot.clone(),
            special_instructions: p.special_instructions.clone().unwrap_or_default(),
        }
    }
}

/// Partial update to a draft; absent fields are left untouched
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub google_map_link: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub alternate_phone: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub preferred_service: Option<String>,
    #[serde(default)]
    pub preferred_time_slot: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl ProfileDraft {
    pub fn apply(&mut self, patch: DraftPatch) {
        let DraftPatch {
            name,
            email,
            address,
            google_map_link,
            phone,
            alternate_phone,
            dob,
            preferred_service,
            preferred_time_slot,
            special_instructions,
        } = patch;

        let fields = [
            (&mut self.name, name),
            (&mut self.email, email),
            (&mut self.address, address),
            (&mut self.google_map_link, google_map_link),
            (&mut self.phone, phone),
            (&mut self.alternate_phone, alternate_phone),
            (&mut self.dob, dob),
            (&mut self.preferred_service, preferred_service),
            (&mut self.preferred_time_slot, preferred_time_slot),
            (&mut self.special_instructions, special_instructions),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}
