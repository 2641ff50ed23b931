use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, DisplayFromStr, PickFirst, serde_as};
use url::form_urlencoded;

use platform_utils::HttpClient;

use crate::error::{FetchError, LnAddressError, LnAddressResult, ProtocolError, ValidationError};
use crate::logger::Logger;
use crate::{log_debug, log_error, log_info, log_warn};

/// The LUD-06 `payRequest` document served at an address's discovery URL.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayServiceDescriptor {
    pub callback: String,
    /// The minimum amount, in millisats, that this endpoint accepts
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub min_sendable: u64,
    /// The maximum amount, in millisats, that this endpoint accepts
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub max_sendable: u64,
    /// Maximum comment length in characters, 0 when comments are not accepted.
    ///
    /// See <https://github.com/lnurl/luds/blob/luds/12.md>
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub comment_allowed: u32,
    /// Raw LUD-06 metadata string, kept for display only.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub tag: Option<String>,
}

impl PayServiceDescriptor {
    fn validate(&self) -> Result<(), FetchError> {
        if url::Url::parse(&self.callback).is_err() {
            return Err(FetchError::InvalidDescriptor);
        }
        if self.min_sendable == 0 || self.min_sendable > self.max_sendable {
            return Err(FetchError::InvalidDescriptor);
        }
        Ok(())
    }

    /// Checks `amount_msat` against the sendable range, reporting the range in whole sats.
    pub fn validate_amount(&self, amount_msat: u64) -> Result<(), ValidationError> {
        let min_sat = self.min_sendable / 1000;
        let max_sat = self.max_sendable / 1000;
        if amount_msat < self.min_sendable {
            return Err(ValidationError::AmountTooSmall { min_sat, max_sat });
        }
        if amount_msat > self.max_sendable {
            return Err(ValidationError::AmountTooBig { min_sat, max_sat });
        }
        Ok(())
    }
}

/// Parameters sent to a pay service's callback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub amount_msat: Option<u64>,
    pub comment: Option<String>,
}

impl InvoiceQuery {
    /// Validates the amount and fits the comment to what the descriptor accepts.
    ///
    /// The comment is dropped when it is blank or when the service takes no comments. Otherwise
    /// it is sent as given, cut to `comment_allowed` characters.
    pub fn new(
        descriptor: &PayServiceDescriptor,
        amount_msat: Option<u64>,
        comment: Option<&str>,
        logger: &dyn Logger,
    ) -> Result<Self, ValidationError> {
        if let Some(amount_msat) = amount_msat {
            descriptor.validate_amount(amount_msat)?;
        }

        let allowed = usize::try_from(descriptor.comment_allowed).unwrap_or(usize::MAX);
        let comment = comment
            .filter(|comment| allowed > 0 && !comment.trim().is_empty())
            .map(|comment| {
                if comment.chars().count() > allowed {
                    log_info!(logger, "Comment truncated to {allowed} characters");
                    comment.chars().take(allowed).collect()
                } else {
                    comment.to_string()
                }
            });

        Ok(Self {
            amount_msat,
            comment,
        })
    }

    /// Appends the query to `callback`.
    ///
    /// A callback that already carries a query string is extended with `&`; when there is
    /// nothing to send the callback is returned unchanged.
    pub fn callback_url(&self, callback: &str) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(amount_msat) = self.amount_msat {
            serializer.append_pair("amount", &amount_msat.to_string());
        }
        if let Some(comment) = &self.comment {
            serializer.append_pair("comment", comment);
        }
        let query = serializer.finish();
        if query.is_empty() {
            return callback.to_string();
        }

        let separator = match callback.find('?') {
            None => "?",
            Some(_) if callback.ends_with('?') || callback.ends_with('&') => "",
            Some(_) => "&",
        };
        format!("{callback}{separator}{query}")
    }
}

/// Terminal outcome of an invoice request.
///
/// Serializes as `{"status": "ok", "bolt11": ...}` or `{"status": "error", "msg": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum InvoiceResult {
    #[serde(rename = "ok")]
    Ok { bolt11: String },
    #[serde(rename = "error")]
    Err {
        #[serde(rename = "msg")]
        message: String,
    },
}

impl InvoiceResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn bolt11(&self) -> Option<&str> {
        match self {
            Self::Ok { bolt11 } => Some(bolt11),
            Self::Err { .. } => None,
        }
    }
}

impl From<LnAddressResult<String>> for InvoiceResult {
    fn from(result: LnAddressResult<String>) -> Self {
        match result {
            Ok(bolt11) => Self::Ok { bolt11 },
            Err(e) => Self::Err {
                message: e.to_string(),
            },
        }
    }
}

/// Retrieves and validates the descriptor served at `url`.
pub fn fetch_descriptor<C: HttpClient + ?Sized>(
    http_client: &C,
    logger: &dyn Logger,
    url: &str,
) -> Result<PayServiceDescriptor, FetchError> {
    log_info!(logger, "Fetching pay service descriptor from {url}");
    let response = http_client.get(url, None).map_err(FetchError::from_http)?;
    if !response.is_success() {
        log_warn!(logger, "Pay service answered with status {}", response.status);
    }

    let body: Value = response.json().map_err(FetchError::from_http)?;
    let descriptor: PayServiceDescriptor = serde_json::from_value(body).map_err(|e| {
        log_debug!(logger, "Descriptor rejected: {e}");
        FetchError::InvalidDescriptor
    })?;
    descriptor.validate()?;

    log_info!(logger, "min. amount: {}", descriptor.min_sendable);
    log_info!(logger, "max. amount: {}", descriptor.max_sendable);
    log_info!(logger, "comment allowed: {}", descriptor.comment_allowed);
    Ok(descriptor)
}

/// Asks the descriptor's callback for an invoice. Every failure, including range violations,
/// ends up as [`InvoiceResult::Err`].
pub fn request_invoice<C: HttpClient + ?Sized>(
    http_client: &C,
    logger: &dyn Logger,
    descriptor: &PayServiceDescriptor,
    amount_msat: Option<u64>,
    comment: Option<&str>,
) -> InvoiceResult {
    let result = try_request_invoice(http_client, logger, descriptor, amount_msat, comment);
    if let Err(e) = &result {
        log_error!(logger, "Invoice request failed: {e}");
    }
    result.into()
}

fn try_request_invoice<C: HttpClient + ?Sized>(
    http_client: &C,
    logger: &dyn Logger,
    descriptor: &PayServiceDescriptor,
    amount_msat: Option<u64>,
    comment: Option<&str>,
) -> LnAddressResult<String> {
    let query = InvoiceQuery::new(descriptor, amount_msat, comment, logger)?;
    match query.amount_msat {
        Some(amount_msat) => log_info!(logger, "amount: {amount_msat} msat"),
        None => log_info!(logger, "amount: none"),
    }

    let url = query.callback_url(&descriptor.callback);
    log_info!(logger, "LNURL pay query: {url}");
    let response = http_client.get(&url, None).map_err(FetchError::from_http)?;
    let body: Value = response.json().map_err(FetchError::from_http)?;

    if let Some(pr) = body.get("pr") {
        return match pr.as_str() {
            Some(pr) => Ok(pr.to_string()),
            None => Err(ProtocolError::UnexpectedResponse.into()),
        };
    }
    match body.get("reason") {
        Some(Value::String(reason)) => Err(LnAddressError::Endpoint(reason.clone())),
        Some(reason) => Err(LnAddressError::Endpoint(reason.to_string())),
        None => Err(ProtocolError::UnexpectedResponse.into()),
    }
}
