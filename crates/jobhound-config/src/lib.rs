//! # jobhound Config
//!
//! Configuration management for jobhound: browser launch settings, search
//! pacing, page selectors, consent handling and export defaults.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
