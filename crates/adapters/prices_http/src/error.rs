//! Price adapter error types.

use cheapswitch_domain::error::CheapSwitchError;

/// Errors specific to the HTTP price adapter.
#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    /// The provider could not be reached or the response was cut short.
    #[error("price provider unreachable")]
    Unreachable(#[source] reqwest::Error),

    /// The provider answered with a server error.
    #[error("price provider unavailable ({status}): {body}")]
    Unavailable { status: u16, body: String },

    /// The provider refused the request.
    #[error("price provider rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The response body is not a list of hour prices.
    #[error("invalid price provider response")]
    Decode(#[source] serde_json::Error),
}

impl PriceError {
    /// Whether the provider may answer if asked again later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Unavailable { .. })
    }
}

impl From<PriceError> for CheapSwitchError {
    fn from(err: PriceError) -> Self {
        CheapSwitchError::Prices {
            transient: err.is_transient(),
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_mark_server_errors_transient() {
        let err: CheapSwitchError = PriceError::Unavailable {
            status: 503,
            body: String::new(),
        }
        .into();
        assert!(err.is_transient());
    }

    #[test]
    fn should_mark_rejections_permanent() {
        let err: CheapSwitchError = PriceError::Rejected {
            status: 401,
            body: "bad token".to_string(),
        }
        .into();
        assert!(!err.is_transient());
    }

    #[test]
    fn should_mark_decode_errors_permanent() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(!PriceError::Decode(source).is_transient());
    }
}
