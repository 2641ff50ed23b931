//! LNURL-pay resolution of Lightning Addresses, as per
//! <https://github.com/lnurl/luds/blob/luds/16.md> and
//! <https://github.com/lnurl/luds/blob/luds/06.md>.

mod address;
mod pay;

pub use address::LightningAddress;
pub use pay::{
    InvoiceQuery, InvoiceResult, PayServiceDescriptor, fetch_descriptor, request_invoice,
};
