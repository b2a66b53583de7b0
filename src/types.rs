//! Core types used throughout the project.

use std::fmt;

/// Identity of a host object taking part in translation.
///
/// The registry never owns host objects; it only remembers which store
/// belongs to which identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Wraps a raw identity allocated by the host.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identity value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direction of a stored mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Localized name → translated name.
    Forward,
    /// Translated name → the name it was translated from.
    Reverse,
}

impl Direction {
    /// Separator used when the key is rendered as text.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Forward => "->",
            Self::Reverse => "<-",
        }
    }
}

/// Key of a single store entry: direction, (already remapped) language and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    /// Forward or reverse entry
    direction: Direction,
    /// Canonical language code
    language: String,
    /// Name being translated
    name: String,
}

impl StoreKey {
    /// Key of a `language->name` entry.
    #[must_use]
    pub fn forward(language: &str, name: &str) -> Self {
        Self { direction: Direction::Forward, language: language.to_string(), name: name.to_string() }
    }

    /// Key of a `language<-name` entry.
    #[must_use]
    pub fn reverse(language: &str, name: &str) -> Self {
        Self { direction: Direction::Reverse, language: language.to_string(), name: name.to_string() }
    }

    /// Forward or reverse.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Canonical language code the key was built with.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Name on the looked-up side of the mapping.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.language, self.direction.arrow(), self.name)
    }
}
