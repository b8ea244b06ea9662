mod client;
mod http_client;

pub use client::{KeyClient, KeyClientError};
pub use http_client::HttpKeyClient;

#[cfg(test)]
pub use client::MockKeyClient;
