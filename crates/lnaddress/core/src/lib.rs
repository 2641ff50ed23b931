//! Resolves Lightning Addresses into BOLT11 invoices over LNURL-pay, and decodes BOLT11 invoices
//! for inspection.

mod client;
pub mod codec;
mod config;
pub mod error;
pub mod invoice;
pub mod lnurl;
pub mod logger;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::LnAddressClient;
pub use codec::Bech32Data;
pub use config::Config;
pub use error::{
    DecodeError, FetchError, LnAddressError, LnAddressResult, ProtocolError, ValidationError,
};
pub use invoice::{Bolt11Invoice, FieldValue};
pub use lnurl::{InvoiceResult, LightningAddress, PayServiceDescriptor};
pub use logger::{LogEntry, Logger, NoopLogger, TracingLogger};
