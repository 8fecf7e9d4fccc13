pub mod analyze;
pub mod fetch;

pub use analyze::analyze;
pub use fetch::{FetchConfig, FetchError, Fetcher, PageSource};
