use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use super::forms::FormError;
use crate::catalog::CatalogError;
use crate::session::SessionError;
use crate::watchlist::WatchlistError;

/// A failure caught at the page boundary. Renders as a one-line message
/// for the page's banner or the form's inline error.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("{message}")]
    Fetch {
        message: &'static str,
        #[source]
        source: CatalogError,
    },
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("Invalid request body")]
    InvalidBody(#[from] JsonRejection),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl PageError {
    pub fn fetch(message: &'static str, source: CatalogError) -> Self {
        PageError::Fetch { message, source }
    }

    /// Maps a session failure, keeping wrong credentials distinct from
    /// storage trouble.
    pub fn session(message: &'static str, err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => PageError::InvalidCredentials,
            other => PageError::Internal {
                message,
                detail: other.to_string(),
            },
        }
    }

    pub fn watchlist(err: WatchlistError) -> Self {
        PageError::Internal {
            message: "Failed to update your watchlist. Please try again.",
            detail: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PageError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            PageError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PageError::InvalidBody(rejection) => rejection.status(),
            PageError::InvalidCredentials | PageError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match &self {
            PageError::Fetch { message, source } => error!("{}: {}", message, source),
            PageError::Internal { message, detail } => error!("{}: {}", message, detail),
            PageError::InvalidBody(rejection) => debug!("Rejected body: {}", rejection.body_text()),
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
