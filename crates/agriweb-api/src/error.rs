//! Error types for agriweb-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The request carried no page token, or one that is unknown or idle too long
    #[error("This page has expired. Reload it to continue.")]
    PageExpired,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::PageExpired => StatusCode::GONE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!("{}", self);
        let body = crate::base_html(
            "Error",
            &format!(
                "<main><div class='message error'>{}</div><p><a href='/'>Back to home</a></p></main>",
                agriweb_utils::escape_html(&self.to_string())
            ),
        );
        (self.status(), Html(body)).into_response()
    }
}
