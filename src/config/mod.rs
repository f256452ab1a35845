//! Configuration for pixelkit defaults
//!
//! Provides types and parsing for TOML configuration such as:
//!
//! ```toml
//! [rotate]
//! resize = true
//! background = "transparent"
//!
//! [animation]
//! default_duration = 100
//! ```

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::*;
