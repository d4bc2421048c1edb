//! Authentication routes
//!
//! Login runs against the injected [`AuthService`](crate::services::backend::AuthService).

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{Credentials, Session};
use crate::error::ApiError;
use crate::services::backend::{with_timeout, BackendError};
use crate::validation::login_schema;
use crate::views::Screen;

/// Confirmation screen after a successful login
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub title: &'static str,
    pub message: &'static str,
    pub session: Session,
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    login_schema().validate(&credentials)?;

    let result = with_timeout(
        state.settings.backend_timeout,
        state.backends.auth.submit_login(&credentials),
    )
    .await;

    match result {
        Ok(session) => {
            tracing::info!(email = %session.email, "Login succeeded");
            Ok(Screen::new(
                "login",
                LoginView {
                    title: "Login Successful!",
                    message: "Welcome back to Local Service Connect.",
                    session,
                },
            ))
        }
        Err(BackendError::Rejected(message)) => {
            tracing::info!(email = %credentials.email, "Login rejected");
            Err(ApiError::unauthorized(message))
        }
        Err(e) => Err(ApiError::Unavailable(e)),
    }
}
