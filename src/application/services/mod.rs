mod keygen_service;
mod shorten_service;

pub use keygen_service::{KeygenError, KeygenService};
pub use shorten_service::{ShortenError, ShortenService};
