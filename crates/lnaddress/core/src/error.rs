use platform_utils::HttpError;
use thiserror::Error;

/// Input rejected before any network round trip, or amount rejected against a descriptor.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed Lightning Address: {0}")]
    MalformedAddress(String),
    #[error("Amount too small, must be in range {min_sat} and {max_sat} sat")]
    AmountTooSmall { min_sat: u64, max_sat: u64 },
    #[error("Amount too big, must be in range {min_sat} and {max_sat} sat")]
    AmountTooBig { min_sat: u64, max_sat: u64 },
}

/// Failures while retrieving a JSON document from a pay service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to reach pay service: {0}")]
    Transport(#[from] HttpError),
    #[error("Pay service returned a non-JSON body: {0}")]
    InvalidJson(String),
    /// Any missing or mistyped required descriptor field. Deliberately carries no detail.
    #[error("Invalid pay service descriptor")]
    InvalidDescriptor,
}

impl FetchError {
    pub(crate) fn from_http(err: HttpError) -> Self {
        match err {
            HttpError::Json(msg) => Self::InvalidJson(msg),
            other => Self::Transport(other),
        }
    }
}

/// The callback answered with JSON, but neither an invoice nor a reason.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unexpected response format")]
    UnexpectedResponse,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed bech32 string: {0}")]
    Malformed(String),
    #[error("Invoice data part too short: {words} words, need at least {required}")]
    Truncated { words: usize, required: usize },
}

impl DecodeError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Everything that can stop the address → invoice pipeline.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LnAddressError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    /// The pay service answered with a `reason`; the text is passed through verbatim.
    #[error("{0}")]
    Endpoint(String),
}

pub type LnAddressResult<T, E = LnAddressError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use platform_utils::HttpError;

    use super::*;

    #[test]
    fn test_range_messages_use_sats() {
        let err = ValidationError::AmountTooSmall {
            min_sat: 1,
            max_sat: 100,
        };
        assert_eq!(
            err.to_string(),
            "Amount too small, must be in range 1 and 100 sat"
        );
        let err = ValidationError::AmountTooBig {
            min_sat: 1,
            max_sat: 100,
        };
        assert_eq!(err.to_string(), "Amount too big, must be in range 1 and 100 sat");
    }

    #[test]
    fn test_http_json_error_becomes_invalid_json() {
        let err = FetchError::from_http(HttpError::Json("expected value".into()));
        assert_eq!(err, FetchError::InvalidJson("expected value".into()));

        let err = FetchError::from_http(HttpError::Connect("refused".into()));
        assert!(matches!(err, FetchError::Transport(HttpError::Connect(_))));
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: LnAddressError = ProtocolError::UnexpectedResponse.into();
        assert_eq!(err.to_string(), "Unexpected response format");

        let err = LnAddressError::Endpoint("amount too small".into());
        assert_eq!(err.to_string(), "amount too small");
    }
}
