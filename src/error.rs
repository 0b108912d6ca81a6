use thiserror::Error;

/// Unified error type for the Lettings client.
///
/// The first three variants are the response classification every call goes
/// through (auth expiry, server rejection, transport failure). The remaining
/// variants cover configuration, body decoding, and collaborator faults.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP 401: the stored token has been purged and the user is being sent
    /// back to the sign-in screen.
    #[error("authentication expired")]
    AuthExpired,

    /// Any other non-2xx response, or a 2xx envelope the server marked as
    /// failed. Displays as exactly the surfaced message.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// Transport-level failure: the request never produced a response.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// A body that could not be serialized, or a successful response that
    /// could not be decoded into the caller's type.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage(message.into())
    }

    pub(crate) fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Error::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// HTTP status attached to this error, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AuthExpired => Some(401),
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Error::AuthExpired)
    }

    /// True for transport failures where no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}
