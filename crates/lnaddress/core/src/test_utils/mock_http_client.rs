use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use platform_utils::{HttpClient, HttpError, HttpResponse};
use tracing::debug;

#[derive(Debug)]
pub struct MockResponse {
    pub(crate) status_code: u16,
    pub(crate) text: String,
}

impl MockResponse {
    pub fn new(status_code: u16, text: impl Into<String>) -> Self {
        MockResponse {
            status_code,
            text: text.into(),
        }
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self::new(200, text)
    }
}

/// Replays queued responses in order and records every requested URL.
///
/// A queued `Err` is returned as-is, which lets tests simulate transport failures.
#[derive(Default)]
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Result<MockResponse, HttpError>>>,
    requests: Mutex<Vec<String>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        MockHttpClient::default()
    }

    pub fn add_response(&self, response: MockResponse) -> &Self {
        debug!("Push response: {response:?}");
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn add_error(&self, error: HttpError) -> &Self {
        debug!("Push error: {error:?}");
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// URLs requested so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockHttpClient {
    fn get(
        &self,
        url: &str,
        _headers: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        let response = responses.pop_front().ok_or_else(|| {
            HttpError::Other(String::from("No response available for GET request"))
        })??;
        debug!("Pop GET response: {response:?}");

        Ok(HttpResponse {
            status: response.status_code,
            body: response.text,
        })
    }
}
