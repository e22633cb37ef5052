pub mod client;
pub mod error;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{Endpoints, SpamApiClient};
pub use error::ApiError;
