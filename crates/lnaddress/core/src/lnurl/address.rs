use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A `username@domain` Lightning Address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LightningAddress {
    pub username: String,
    pub domain: String,
}

impl LightningAddress {
    /// Splits `address` on its single `@`.
    ///
    /// Domain syntax is not checked and neither part is percent-encoded; the discovery URL is
    /// composed verbatim from the two halves.
    pub fn resolve(address: &str) -> Result<Self, ValidationError> {
        let mut parts = address.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(username), Some(domain), None) if !username.is_empty() && !domain.is_empty() => {
                Ok(Self {
                    username: username.to_string(),
                    domain: domain.to_string(),
                })
            }
            _ => Err(ValidationError::MalformedAddress(address.to_string())),
        }
    }

    /// The LUD-16 well-known endpoint serving the pay-service descriptor.
    pub fn discovery_url(&self) -> String {
        format!(
            "https://{}/.well-known/lnurlp/{}",
            self.domain, self.username
        )
    }
}

impl FromStr for LightningAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for LightningAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.domain)
    }
}
