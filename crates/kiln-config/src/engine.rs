//! Template engine identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the engine a host uses to render a class of templates.
///
/// Not validated here; the host rejects identifiers it cannot serve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(String);

impl EngineId {
    /// Nunjucks-syntax templates.
    pub const NUNJUCKS: &'static str = "njk";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn nunjucks() -> Self {
        Self::new(Self::NUNJUCKS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EngineId {
    fn default() -> Self {
        Self::nunjucks()
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EngineId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EngineId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
