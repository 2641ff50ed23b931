//! HTTP error types for platform-utils.

use thiserror::Error;

/// Failure of a single GET, split by where it went wrong.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("Timeout error: {0}")]
    Timeout(String),
    /// The request could not be built or followed, e.g. a bad URL or a redirect loop.
    #[error("Request error: {0}")]
    Request(String),
    #[error("Connect error: {0}")]
    Connect(String),
    /// The server answered but the body could not be read as text.
    #[error("Response error: {0}")]
    Response(String),
    #[error("Json error: {0}")]
    Json(String),
    #[error("Other error: {0}")]
    Other(String),
}

impl From<bitreq::Error> for HttpError {
    fn from(err: bitreq::Error) -> Self {
        let err_str = format!("{err:?}");
        match &err {
            bitreq::Error::IoError(io_err) if io_err.kind() == std::io::ErrorKind::TimedOut => {
                Self::Timeout(err_str)
            }
            bitreq::Error::IoError(_) | bitreq::Error::AddressNotFound => Self::Connect(err_str),
            bitreq::Error::InvalidUrl(_)
            | bitreq::Error::TooManyRedirections
            | bitreq::Error::InfiniteRedirectionLoop
            | bitreq::Error::RedirectLocationMissing => Self::Request(err_str),
            bitreq::Error::InvalidUtf8InBody(_)
            | bitreq::Error::InvalidUtf8InResponse
            | bitreq::Error::BodyOverflow => Self::Response(err_str),
            bitreq::Error::Other(msg) => Self::Other((*msg).to_string()),
            _ => Self::Other(err_str),
        }
    }
}
