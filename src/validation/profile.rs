//! Customer profile form schema

use chrono::NaiveDate;

use super::rules::{is_adult_birth_date, is_digits, is_email, is_url, min_chars, parse_date};
use super::{FieldRule, Schema, ValidationErrors};
use crate::domain::{CustomerProfile, ImageReference, ProfileDraft};

pub const DOB_REQUIRED: &str = "Date of birth is required";
pub const DOB_INVALID: &str =
    "You must be at least 18 years old and cannot select today or future date";

/// Build the profile schema against a fixed "today"
pub fn profile_schema(today: NaiveDate) -> Schema<ProfileDraft> {
    Schema::new()
        .field(FieldRule::new("name").check(
            |d: &ProfileDraft| min_chars(&d.name, 2),
            "Name must be at least 2 characters",
        ))
        .field(
            FieldRule::new("email").check(|d: &ProfileDraft| is_email(&d.email), "Invalid email"),
        )
        .field(FieldRule::new("address").check(
            |d: &ProfileDraft| min_chars(&d.address, 5),
            "Address must be at least 5 characters",
        ))
        .field(FieldRule::new("googleMapLink").check(
            |d: &ProfileDraft| d.google_map_link.is_empty() || is_url(&d.google_map_link),
            "Enter a valid Google Map URL",
        ))
        .field(
            FieldRule::new("phone")
                .check(
                    |d: &ProfileDraft| min_chars(&d.phone, 10),
                    "Phone must be at least 10 digits",
                )
                .check(
                    |d: &ProfileDraft| is_digits(&d.phone),
                    "Phone number must contain only digits",
                ),
        )
        .field(FieldRule::new("preferredService").check(
            |d: &ProfileDraft| min_chars(&d.preferred_service, 2),
            "Please specify a preferred service",
        ))
        .field(FieldRule::new("preferredTimeSlot").check(
            |d: &ProfileDraft| min_chars(&d.preferred_time_slot, 2),
            "Please specify a time slot",
        ))
        .field(
            FieldRule::new("dob")
                .check(|d: &ProfileDraft| !d.dob.is_empty(), DOB_REQUIRED)
                .check(
                    move |d: &ProfileDraft| {
                        parse_date(&d.dob).is_some_and(|dob| is_adult_birth_date(dob, today))
                    },
                    DOB_INVALID,
                ),
        )
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Validate a draft and turn it into a committable profile.
///
/// The avatar is carried over from the caller since it is not a form field.
pub fn validate_profile(
    draft: &ProfileDraft,
    avatar: Option<ImageReference>,
    today: NaiveDate,
) -> Result<CustomerProfile, ValidationErrors> {
    profile_schema(today).validate(draft)?;

    let dob = parse_date(&draft.dob)
        .ok_or_else(|| ValidationErrors::single("dob", DOB_INVALID))?;

    Ok(CustomerProfile {
        name: draft.name.clone(),
        email: draft.email.clone(),
        address: draft.address.clone(),
        google_map_link: optional(&draft.google_map_link),
        phone: draft.phone.clone(),
        alternate_phone: optional(&draft.alternate_phone),
        dob,
        preferred_service: draft.preferred_service.clone(),
        preferred_time_slot: draft.preferred_time_slot.clone(),
        special_instructions: optional(&draft.special_instructions),
        avatar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn draft() -> ProfileDraft {
        ProfileDraft::from(&CustomerProfile::default())
    }

    #[test]
    fn default_snapshot_is_valid() {
        let profile = validate_profile(&draft(), None, today()).unwrap();
        assert_eq!(profile, CustomerProfile::default());
    }

    #[test]
    fn short_phone_fails_on_length() {
        let mut d = draft();
        d.phone = "12345".into();
        let errors = profile_schema(today()).validate(&d).unwrap_err();
        assert_eq!(errors.messages("phone"), ["Phone must be at least 10 digits"]);
    }

    #[test]
    fn non_digit_phone_fails_on_format() {
        let mut d = draft();
        d.phone = "abcdefghij".into();
        let errors = profile_schema(today()).validate(&d).unwrap_err();
        assert_eq!(
            errors.messages("phone"),
            ["Phone number must contain only digits"]
        );
    }

    #[test]
    fn dob_exactly_eighteen_years_ago_is_invalid() {
        let mut d = draft();
        d.dob = "2008-10-19".into();
        let errors = profile_schema(today()).validate(&d).unwrap_err();
        assert_eq!(errors.first("dob"), Some(DOB_INVALID));

        d.dob = "2008-10-18".into();
        assert!(profile_schema(today()).is_valid(&d));
    }

    #[test]
    fn empty_dob_is_required() {
        let mut d = draft();
        d.dob.clear();
        let errors = profile_schema(today()).validate(&d).unwrap_err();
        assert_eq!(errors.first("dob"), Some(DOB_REQUIRED));
    }

    #[test]
    fn unparsable_dob_is_invalid() {
        let mut d = draft();
        d.dob = "not a date".into();
        let errors = profile_schema(today()).validate(&d).unwrap_err();
        assert_eq!(errors.messages("dob"), [DOB_INVALID]);
    }

    #[test]
    fn empty_map_link_means_absent() {
        let mut d = draft();
        d.google_map_link.clear();
        d.special_instructions.clear();
        let profile = validate_profile(&d, None, today()).unwrap();
        assert_eq!(profile.google_map_link, None);
        assert_eq!(profile.special_instructions, None);

        d.google_map_link = "not a url".into();
        let errors = validate_profile(&d, None, today()).unwrap_err();
        assert_eq!(errors.first("googleMapLink"), Some("Enter a valid Google Map URL"));
    }

    #[test]
    fn every_failing_field_is_reported() {
        let d = ProfileDraft::default();
        let errors = profile_schema(today()).validate(&d).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            [
                "address",
                "dob",
                "email",
                "name",
                "phone",
                "preferredService",
                "preferredTimeSlot"
            ]
        );
        // alternate phone and special instructions are unconstrained
        assert!(errors.messages("alternatePhone").is_empty());
    }
}
