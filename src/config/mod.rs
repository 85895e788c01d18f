//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → read once by the bootstrap, never reloaded
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; filter registration is one-shot
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod profiles;
pub mod schema;
pub mod validation;

pub use profiles::{Profiles, PROFILE_DEV, PROFILE_PRODUCTION};
pub use schema::ServerConfig;
