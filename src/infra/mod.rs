pub mod config;
pub mod cookies;

pub use config::{ConfigManager, ServerConfig};
pub use cookies::{CookieCodec, CookieError};
