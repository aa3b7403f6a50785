//! Retry policy for the installer download.
//!
//! Network and HTTP failures are retried a fixed number of times with a fixed
//! delay between attempts; local storage failures are not.

mod error;
mod policy;
mod run;

pub use error::FetchError;
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
