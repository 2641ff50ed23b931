mod collecting_logger;
mod mock_http_client;

pub use collecting_logger::CollectingLogger;
pub use mock_http_client::{MockHttpClient, MockResponse};
