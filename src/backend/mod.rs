#![allow(unused_imports)]

pub mod fetch;
pub use fetch::FetchTransport;

use thiserror::Error;

/// Raw reply obtained from the routing backend.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

#[derive(Error, Debug)]
/// Failure to obtain any reply at all.
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("request timed out after {0} ms")]
    Timeout(u32),
}

/// Trait for routing-backend transport implementations.
///
/// `user` is the optional signed-in identity; `None` sends the request
/// unauthenticated.
pub trait Transport {
    async fn execute(&self, payload: &str, user: Option<&str>) -> Result<Reply, TransportError>;
}
