//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use cheapswitch_domain::error::CheapSwitchError;

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CheapSwitchError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(CheapSwitchError);

impl From<CheapSwitchError> for ApiError {
    fn from(err: CheapSwitchError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self(CheapSwitchError::Validation(message.into()))
    }

    fn status(&self) -> StatusCode {
        match &self.0 {
            CheapSwitchError::Validation(_) | CheapSwitchError::OutsideRenewalWindow => {
                StatusCode::BAD_REQUEST
            }
            CheapSwitchError::Device(_) | CheapSwitchError::Prices { .. } => {
                StatusCode::BAD_GATEWAY
            }
            CheapSwitchError::Schedule(_) | CheapSwitchError::OutboundAddress(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Render an error and its sources as one line.
fn chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = chain(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        } else {
            tracing::debug!(error = %message, "request rejected");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
