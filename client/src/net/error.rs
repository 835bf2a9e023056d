//! Error taxonomy for calls to the catalog service.
//!
//! ERROR HANDLING
//! ==============
//! Every REST helper returns `Result<_, ApiError>`. Views never render the
//! `Display` text directly; they show [`ApiError::user_message`], which keeps
//! transport detail out of forms.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub const NETWORK_FAILURE_MESSAGE: &str = "Could not reach the server. Please try again.";
pub const INVALID_RESPONSE_MESSAGE: &str = "The server sent an unexpected response.";
pub const UNAVAILABLE_MESSAGE: &str = "This action is only available in the browser.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Credentials rejected by `POST /login`.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    /// Any other non-2xx response.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// Transport failure: service unreachable, CORS, aborted request.
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// 2xx response whose body does not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// Called outside the browser (server render).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Text suitable for display next to the form that triggered the call.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationFailed(message) | Self::Rejected { message, .. } => message.clone(),
            Self::NetworkFailure(_) => NETWORK_FAILURE_MESSAGE.to_owned(),
            Self::InvalidResponse(_) => INVALID_RESPONSE_MESSAGE.to_owned(),
            Self::Unavailable => UNAVAILABLE_MESSAGE.to_owned(),
        }
    }
}
