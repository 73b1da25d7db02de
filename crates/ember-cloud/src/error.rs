//! Vendor cloud error taxonomy
//!
//! Every failure from the vendor API collapses into one of four classes;
//! config flows surface them to the user as short error codes attached to
//! the redisplayed form.

use thiserror::Error;

/// Errors raised by the vendor cloud client.
#[derive(Debug, Error)]
pub enum CloudError {
    /// The cloud rejected the API token.
    #[error("authentication rejected by the vendor cloud")]
    Authentication,

    /// The endpoint could not be reached.
    #[error("cannot connect to the vendor cloud: {0}")]
    Connection(String),

    /// The request did not complete in time.
    #[error("vendor cloud request timed out")]
    Timeout,

    /// Anything else the cloud or transport threw at us.
    #[error("vendor cloud API error: {0}")]
    Api(String),
}

impl CloudError {
    /// The user-visible error code for this failure class.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Authentication => "invalid_auth",
            Self::Connection(_) => "cannot_connect",
            Self::Timeout => "timeout_connect",
            Self::Api(_) => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CloudError::Authentication.error_code(), "invalid_auth");
        assert_eq!(
            CloudError::Connection("refused".into()).error_code(),
            "cannot_connect"
        );
        assert_eq!(CloudError::Timeout.error_code(), "timeout_connect");
        assert_eq!(CloudError::Api("boom".into()).error_code(), "unknown");
    }
}
