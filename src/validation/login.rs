//! Login form schema

use super::rules::{is_email, min_chars};
use super::{FieldRule, Schema};
use crate::domain::Credentials;

pub fn login_schema() -> Schema<Credentials> {
    Schema::new()
        .field(FieldRule::new("email").check(
            |c: &Credentials| is_email(&c.email),
            "Please enter a valid email address",
        ))
        .field(FieldRule::new("password").check(
            |c: &Credentials| min_chars(&c.password, 6),
            "Password must be at least 6 characters",
        ))
}
