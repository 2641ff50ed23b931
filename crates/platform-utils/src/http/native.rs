//! Native HTTP client using bitreq.

use std::collections::HashMap;

use crate::HttpError;

use super::{HttpClient, HttpResponse};

/// HTTP client implementation using bitreq's blocking API.
///
/// By default no headers are added and no timeout is configured, so a request waits as long as
/// the underlying socket allows.
#[derive(Clone, Debug, Default)]
pub struct BitreqHttpClient {
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
}

impl BitreqHttpClient {
    /// Create a new `BitreqHttpClient` with an optional user agent.
    pub fn new(user_agent: Option<String>) -> Self {
        Self {
            user_agent,
            timeout_secs: None,
        }
    }

    /// Sets a per-request timeout in seconds. `None` leaves bitreq's default in place.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn add_common_headers(&self, req: bitreq::Request) -> bitreq::Request {
        let mut req = req;
        if let Some(timeout) = self.timeout_secs {
            req = req.with_timeout(timeout);
        }
        if let Some(ua) = &self.user_agent {
            req = req.with_header("User-Agent", ua);
        }
        req
    }
}

impl HttpClient for BitreqHttpClient {
    fn get(
        &self,
        url: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        tracing::debug!("Making GET request to: {url}");
        let mut req = self.add_common_headers(bitreq::get(url));

        if let Some(headers) = headers {
            for (key, value) in headers {
                req = req.with_header(key, value);
            }
        }

        let response = req.send()?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let status = response.status_code as u16;
        let body = response.as_str()?.to_string();
        tracing::debug!("Received response, status: {status}");
        tracing::trace!("raw response body: {body}");

        Ok(HttpResponse { status, body })
    }
}
