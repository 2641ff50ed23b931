//! Blocking HTTP transport shared by the Lightning Address crates.
//!
//! The resolver only ever issues plain GET requests and waits for the answer on the
//! calling thread, so the client abstraction here is synchronous.

mod error;
pub mod http;

pub use error::HttpError;
pub use http::{BitreqHttpClient, DefaultHttpClient, HttpClient, HttpResponse};
