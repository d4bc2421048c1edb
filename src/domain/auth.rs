//! Authentication domain types
//!
//! Login is mocked in-process; these types describe the request and the
//! session handed back on success.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sign in request
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session returned by a successful login
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let credentials = Credentials {
            email: "test@example.com".into(),
            password: "hunter22".into(),
        };
        let printed = format!("{credentials:?}");
        assert!(printed.contains("test@example.com"));
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("hunter22"));
    }
}
