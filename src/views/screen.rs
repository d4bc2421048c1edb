use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A projected screen, tagged with its name so a client can pick the renderer
#[derive(Debug, Serialize)]
pub struct Screen<T: Serialize> {
    pub screen: &'static str,
    pub data: T,
}

impl<T: Serialize> Screen<T> {
    pub fn new(screen: &'static str, data: T) -> Self {
        Self { screen, data }
    }
}

impl<T: Serialize> IntoResponse for Screen<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
