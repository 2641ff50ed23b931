use serde::{Deserialize, Serialize};

/// Transport settings for [`crate::LnAddressClient`].
///
/// The default sends no `User-Agent` header and sets no request timeout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: Option<String>,
    /// Whole seconds before a request is abandoned. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}
