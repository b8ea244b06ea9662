mod health;
mod index;
mod keygen;
mod redirect;
mod shorten;

pub use health::health_handler;
pub use index::index_handler;
pub use keygen::{generate_key_handler, new_key_handler};
pub use redirect::{external_redirect_handler, internal_redirect_handler};
pub use shorten::shorten_handler;
