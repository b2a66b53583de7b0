use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "standardTranslations[0].target")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Initialization-time inputs of the translation runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeSettings {
    /// Language code alias → canonical language code.
    ///
    /// Applied once, so a canonical code must not itself be an alias.
    pub language_remap: BTreeMap<String, String>,

    /// Registrations executed once at startup to pre-populate the standard library.
    pub standard_translations: Vec<StandardTranslation>,
}

/// One standard-library registration.
///
/// Installed as `add_translation(target, language, localized, canonical)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardTranslation {
    /// Path of the host object, e.g. `"Array.prototype"`.
    pub target: String,
    pub language: String,
    /// Name as written in localized source.
    pub localized: String,
    /// Name the host object actually uses.
    pub canonical: String,
}

impl RuntimeSettings {
    /// Parses settings from a JSON document and validates them.
    ///
    /// # Errors
    /// - `ConfigError::ParseError` if the document is not valid settings JSON
    /// - `ConfigError::ValidationErrors` if the parsed settings are invalid
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(
            aliases = settings.language_remap.len(),
            translations = settings.standard_translations.len(),
            "Settings parsed successfully"
        );
        Ok(settings)
    }

    /// # Errors
    /// - Empty alias or canonical code
    /// - Alias mapped to itself, or to another alias
    /// - Empty field in a standard translation
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (alias, canonical) in &self.language_remap {
            if alias.is_empty() {
                errors.push(ValidationError::new(
                    "languageRemap",
                    "Alias cannot be empty. Example: {\"en_US\": \"en\"}",
                ));
            }
            if canonical.is_empty() {
                errors.push(ValidationError::new(
                    format!("languageRemap.{alias}"),
                    "The canonical language code cannot be empty",
                ));
            } else if canonical == alias {
                errors.push(ValidationError::new(
                    format!("languageRemap.{alias}"),
                    "An alias cannot map to itself. Remove this entry",
                ));
            } else if self.language_remap.contains_key(canonical) {
                errors.push(ValidationError::new(
                    format!("languageRemap.{alias}"),
                    format!(
                        "'{canonical}' is itself an alias. Map '{alias}' directly to the canonical code"
                    ),
                ));
            }
        }

        for (index, entry) in self.standard_translations.iter().enumerate() {
            let fields = [
                ("target", &entry.target),
                ("language", &entry.language),
                ("localized", &entry.localized),
                ("canonical", &entry.canonical),
            ];
            for (name, value) in fields {
                if value.is_empty() {
                    errors.push(ValidationError::new(
                        format!("standardTranslations[{index}].{name}"),
                        "The value cannot be empty",
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
