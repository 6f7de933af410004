//! I/O operations for crawling: HTTP, pacing, retries, pagination and
//! appending pages to disk. Each network-facing piece sits behind a trait so
//! tests can script responses.

mod driver;
mod fetcher;
mod gate;
mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;


pub use driver::PaginationDriver;
pub use fetcher::{PageFetcher, RetryingFetcher};
pub use gate::{GatePermit, RateGate};
pub use http::{HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
