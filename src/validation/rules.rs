//! Reusable field predicates

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Minimum age for a customer account, in whole years
pub const MINIMUM_AGE_YEARS: i32 = 18;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Length in characters, not bytes
pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

/// Absolute URL as accepted by a browser URL parser
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Parse an ISO `YYYY-MM-DD` form date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Whole years between `dob` and `today`, counting a year only once its
/// month/day has been reached.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years - 1
    } else {
        years
    }
}

/// Date of birth strictly in the past and strictly more than
/// [`MINIMUM_AGE_YEARS`] years ago; the 18th birthday itself does not qualify.
pub fn is_adult_birth_date(dob: NaiveDate, today: NaiveDate) -> bool {
    if dob >= today {
        return false;
    }
    let age = age_in_years(dob, today);
    let birthday_passed = (today.month(), today.day()) > (dob.month(), dob.day());
    age > MINIMUM_AGE_YEARS || (age == MINIMUM_AGE_YEARS && birthday_passed)
}
