use std::sync::Arc;

use platform_utils::{BitreqHttpClient, DefaultHttpClient, HttpClient};

use crate::config::Config;
use crate::error::{DecodeError, FetchError, LnAddressResult, ValidationError};
use crate::invoice::{self, Bolt11Invoice};
use crate::lnurl::{self, InvoiceResult, LightningAddress, PayServiceDescriptor};
use crate::logger::{Logger, NoopLogger};
use crate::{log_error, log_info};

/// Runs the address → descriptor → invoice pipeline over an injected transport and logger.
///
/// Holds no per-request state, so one client can serve several threads.
pub struct LnAddressClient<C = DefaultHttpClient> {
    http_client: C,
    logger: Arc<dyn Logger>,
}

impl LnAddressClient<DefaultHttpClient> {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        let http_client = BitreqHttpClient::new(config.user_agent.clone())
            .with_timeout(config.request_timeout_secs);
        Self::with_http_client(http_client)
    }
}

impl Default for LnAddressClient<DefaultHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> LnAddressClient<C> {
    pub fn with_http_client(http_client: C) -> Self {
        Self {
            http_client,
            logger: Arc::new(NoopLogger),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn resolve(&self, address: &str) -> Result<LightningAddress, ValidationError> {
        let address = LightningAddress::resolve(address)?;
        log_info!(self.logger, "Transformed URL: {}", address.discovery_url());
        Ok(address)
    }

    pub fn fetch_descriptor(
        &self,
        address: &LightningAddress,
    ) -> Result<PayServiceDescriptor, FetchError> {
        lnurl::fetch_descriptor(
            &self.http_client,
            self.logger.as_ref(),
            &address.discovery_url(),
        )
    }

    pub fn request_invoice(
        &self,
        descriptor: &PayServiceDescriptor,
        amount_msat: Option<u64>,
        comment: Option<&str>,
    ) -> InvoiceResult {
        lnurl::request_invoice(
            &self.http_client,
            self.logger.as_ref(),
            descriptor,
            amount_msat,
            comment,
        )
    }

    /// Resolves `address` and requests an invoice for `amount_sat` whole satoshis.
    ///
    /// Never fails outright: every problem along the way is reported as
    /// [`InvoiceResult::Err`] carrying a displayable message.
    pub fn get_bolt11(
        &self,
        address: &str,
        amount_sat: Option<u64>,
        comment: Option<&str>,
    ) -> InvoiceResult {
        match self.prepare(address, amount_sat) {
            Ok((descriptor, amount_msat)) => self.request_invoice(&descriptor, amount_msat, comment),
            Err(e) => {
                log_error!(self.logger, "in get_bolt11: {e}");
                InvoiceResult::Err {
                    message: e.to_string(),
                }
            }
        }
    }

    pub fn decode_invoice(&self, invoice: &str) -> Result<Bolt11Invoice, DecodeError> {
        invoice::decode_with_logger(invoice, self.logger.as_ref())
    }

    fn prepare(
        &self,
        address: &str,
        amount_sat: Option<u64>,
    ) -> LnAddressResult<(PayServiceDescriptor, Option<u64>)> {
        let address = self.resolve(address)?;
        let descriptor = self.fetch_descriptor(&address)?;
        let amount_msat = match amount_sat {
            Some(sat) => Some(sat.checked_mul(1000).ok_or(ValidationError::AmountTooBig {
                min_sat: descriptor.min_sendable / 1000,
                max_sat: descriptor.max_sendable / 1000,
            })?),
            None => None,
        };
        Ok((descriptor, amount_msat))
    }
}

#[cfg(test)]
mod tests {
    use platform_utils::HttpError;

    use super::*;
    use crate::test_utils::{CollectingLogger, MockHttpClient, MockResponse};

    const DESCRIPTOR: &str = r#"{"callback":"https://example.com/cb","minSendable":1000,"maxSendable":100000,"commentAllowed":10,"tag":"payRequest"}"#;

    fn client() -> (Arc<MockHttpClient>, Arc<CollectingLogger>, LnAddressClient<Arc<MockHttpClient>>) {
        let mock = Arc::new(MockHttpClient::new());
        let logger = Arc::new(CollectingLogger::default());
        let client = LnAddressClient::with_http_client(mock.clone()).with_logger(logger.clone());
        (mock, logger, client)
    }

    #[test]
    fn test_get_bolt11_end_to_end() {
        let (mock, logger, client) = client();
        mock.add_response(MockResponse::ok(DESCRIPTOR))
            .add_response(MockResponse::ok(r#"{"pr":"lnbc50n1abc"}"#));

        let result = client.get_bolt11("alice@example.com", Some(5), Some("hi"));

        assert_eq!(
            result,
            InvoiceResult::Ok {
                bolt11: "lnbc50n1abc".into()
            }
        );
        assert_eq!(
            mock.requests(),
            vec![
                "https://example.com/.well-known/lnurlp/alice",
                "https://example.com/cb?amount=5000&comment=hi",
            ]
        );
        assert!(logger.contains("Transformed URL: https://example.com/.well-known/lnurlp/alice"));
        assert!(logger.contains("LNURL pay query: https://example.com/cb?amount=5000&comment=hi"));
    }

    #[test]
    fn test_get_bolt11_without_amount_omits_parameter() {
        let (mock, _, client) = client();
        mock.add_response(MockResponse::ok(DESCRIPTOR))
            .add_response(MockResponse::ok(r#"{"pr":"lnbc1abc"}"#));

        assert!(client.get_bolt11("alice@example.com", None, None).is_ok());
        assert_eq!(mock.requests()[1], "https://example.com/cb");
    }

    #[test]
    fn test_malformed_address_makes_no_request() {
        let (mock, logger, client) = client();

        let result = client.get_bolt11("alice.example.com", Some(5), None);

        assert_eq!(
            result,
            InvoiceResult::Err {
                message: "Malformed Lightning Address: alice.example.com".into()
            }
        );
        assert!(mock.requests().is_empty());
        assert!(logger.contains("in get_bolt11: Malformed Lightning Address"));
    }

    #[test]
    fn test_amount_below_range() {
        let (mock, _, client) = client();
        mock.add_response(MockResponse::ok(DESCRIPTOR));

        let result = client.get_bolt11("alice@example.com", Some(0), None);

        assert_eq!(
            result,
            InvoiceResult::Err {
                message: "Amount too small, must be in range 1 and 100 sat".into()
            }
        );
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_amount_overflow_reports_too_big() {
        let (mock, _, client) = client();
        mock.add_response(MockResponse::ok(DESCRIPTOR));

        let result = client.get_bolt11("alice@example.com", Some(u64::MAX), None);

        assert_eq!(
            result,
            InvoiceResult::Err {
                message: "Amount too big, must be in range 1 and 100 sat".into()
            }
        );
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let (mock, _, client) = client();
        mock.add_error(HttpError::Timeout("timed out".into()));

        let result = client.get_bolt11("alice@example.com", Some(5), None);

        match result {
            InvoiceResult::Err { message } => assert!(message.contains("timed out"), "{message}"),
            InvoiceResult::Ok { .. } => panic!("expected an error"),
        }
    }

    #[test]
    fn test_decode_invoice_logs_through_injected_logger() {
        let (_, logger, client) = client();
        let invoice = client
            .decode_invoice("lnbc1pvjluezrq2vdhkven9v5q8w4ur23clxd5mzfsh79vn6pg0kaytjeq8w4ur23clxd5mzfsh79vn6pg0kaytjeq8w4ur23clxd5mzfsh79vn6pg0kaytjeq8w4ur2323cczc")
            .unwrap();
        assert_eq!(invoice.description(), Some("coffee"));
        assert!(logger.contains("Found field 'd'"));
    }

    #[test]
    fn test_client_from_config() {
        let config = Config {
            user_agent: Some("lnaddress/0.1".into()),
            request_timeout_secs: Some(10),
        };
        let client = LnAddressClient::from_config(&config);
        assert!(client.resolve("alice@example.com").is_ok());
    }
}
