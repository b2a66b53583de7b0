//! Runtime configuration: language remap table and standard translations.

/// Configuration types and validation
mod types;

pub use types::{ConfigError, RuntimeSettings, StandardTranslation, ValidationError};
