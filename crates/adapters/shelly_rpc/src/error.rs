//! Shelly RPC adapter error types.

use cheapswitch_domain::error::CheapSwitchError;

/// Errors specific to the Shelly RPC adapter.
#[derive(Debug, thiserror::Error)]
pub enum ShellyError {
    /// The request never got an HTTP response.
    #[error("{method} request failed")]
    Transport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The device answered with a non-200 status.
    #[error("{method} returned {status}: {body}")]
    Status {
        method: &'static str,
        status: u16,
        body: String,
    },

    /// The response body is not what the method returns.
    #[error("invalid {method} response")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A trigger could not be encoded as a request body.
    #[error("failed to encode {method} request")]
    Encode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ShellyError> for CheapSwitchError {
    fn from(err: ShellyError) -> Self {
        CheapSwitchError::Device(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_with_body() {
        let err = ShellyError::Status {
            method: "Schedule.List",
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Schedule.List returned 500: boom");
    }

    #[test]
    fn should_convert_into_device_error() {
        let err: CheapSwitchError = ShellyError::Status {
            method: "Switch.Set",
            status: 404,
            body: String::new(),
        }
        .into();
        assert!(matches!(err, CheapSwitchError::Device(_)));
        assert!(!err.is_transient());
    }
}
