//! HTTP client abstraction.
//!
//! Uses bitreq's blocking request API. Callers that need a different transport (or a scripted
//! one in tests) implement [`HttpClient`] themselves.

use std::collections::HashMap;

use crate::HttpError;

mod native;

pub use native::BitreqHttpClient;

/// Default HTTP client type.
pub type DefaultHttpClient = BitreqHttpClient;

/// Response from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Returns true if the status code indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T>(&self) -> Result<T, HttpError>
    where
        for<'a> T: serde::de::Deserialize<'a>,
    {
        serde_json::from_str::<T>(self.body.trim()).map_err(|e| HttpError::Json(e.to_string()))
    }
}

/// HTTP client trait for making requests.
///
/// Every call blocks the calling thread until the response body has been read. Implementations
/// must be shareable between threads; they hold no per-request state.
pub trait HttpClient: Send + Sync {
    /// Makes a GET request.
    /// ### Arguments
    /// - `url`: the URL on which GET will be called
    /// - `headers`: optional headers that will be set on the request
    fn get(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError>;
}

impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    fn get(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        (**self).get(url, headers)
    }
}

impl<T: HttpClient + ?Sized> HttpClient for Box<T> {
    fn get(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        (**self).get(url, headers)
    }
}
