//! Backend capabilities
//!
//! Login, profile storage and image upload are external dependencies. Each is
//! a trait so the screens can run against the in-process mocks below, a test
//! fake, or a real network client without touching the transition logic.

use async_trait::async_trait;
use chrono::Utc;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::attachment::ImageAttachment;
use crate::domain::{Credentials, CustomerProfile, ImageReference, Session};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend answered and refused the request
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or failed internally
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend call timed out after {0:?}")]
    TimedOut(Duration),
}

pub type BackendResult<T> = Result<T, BackendError>;

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn submit_login(&self, credentials: &Credentials) -> BackendResult<Session>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Persist `profile`, returning the committed snapshot
    async fn save_profile(&self, profile: CustomerProfile) -> BackendResult<CustomerProfile>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload_image(&self, image: &ImageAttachment) -> BackendResult<ImageReference>;
}

/// Bound a backend call so a stuck request resolves to an error
pub async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = BackendResult<T>>,
) -> BackendResult<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Backend call timed out");
            Err(BackendError::TimedOut(limit))
        }
    }
}

/// The capabilities a screen needs, bundled for injection
#[derive(Clone)]
pub struct Backends {
    pub auth: Arc<dyn AuthService>,
    pub profiles: Arc<dyn ProfileStore>,
    pub images: Arc<dyn ImageStore>,
}

impl Backends {
    /// In-process mocks with the given simulated latency
    pub fn mock(latency: Duration, demo_email: &str, fail_profile_saves: bool) -> Self {
        Self {
            auth: Arc::new(MockAuthService::new(latency, demo_email)),
            profiles: Arc::new(MockProfileStore::new(latency, fail_profile_saves)),
            images: Arc::new(MockImageStore::new(latency)),
        }
    }
}

async fn simulate_round_trip(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Accepts exactly one demo account, any password
pub struct MockAuthService {
    latency: Duration,
    demo_email: String,
}

impl MockAuthService {
    pub fn new(latency: Duration, demo_email: &str) -> Self {
        Self {
            latency,
            demo_email: demo_email.to_string(),
        }
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn submit_login(&self, credentials: &Credentials) -> BackendResult<Session> {
        simulate_round_trip(self.latency).await;

        if credentials.email != self.demo_email {
            return Err(BackendError::Rejected(format!(
                "Invalid email or password. Try {}",
                self.demo_email
            )));
        }

        info!(email = %credentials.email, "Mock login accepted");
        Ok(Session {
            email: credentials.email.clone(),
            signed_in_at: Utc::now(),
        })
    }
}

/// Echoes the saved profile back as the committed snapshot
pub struct MockProfileStore {
    latency: Duration,
    fail: AtomicBool,
}

impl MockProfileStore {
    pub fn new(latency: Duration, fail: bool) -> Self {
        Self {
            latency,
            fail: AtomicBool::new(fail),
        }
    }

    /// Toggle the simulated commit failure
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn save_profile(&self, profile: CustomerProfile) -> BackendResult<CustomerProfile> {
        simulate_round_trip(self.latency).await;

        if self.fail.load(Ordering::Relaxed) {
            return Err(BackendError::Unavailable(
                "simulated profile store failure".to_string(),
            ));
        }

        debug!(name = %profile.name, "Mock profile store committed snapshot");
        Ok(profile)
    }
}

/// Hands out a fresh path per upload
pub struct MockImageStore {
    latency: Duration,
}

impl MockImageStore {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn upload_image(&self, image: &ImageAttachment) -> BackendResult<ImageReference> {
        simulate_round_trip(self.latency).await;

        let extension = image
            .content_type
            .strip_prefix("image/")
            .unwrap_or("bin")
            .replace("jpeg", "jpg");
        let url = format!("/uploads/avatars/{}.{}", Uuid::new_v4(), extension);
        debug!(url = %url, size = image.size(), "Mock image store accepted upload");
        Ok(ImageReference { url })
    }
}
