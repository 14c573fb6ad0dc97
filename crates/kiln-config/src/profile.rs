//! Profiles: the explicit parameters a site setup is produced from.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dirs::DirectoryMapping;
use crate::engine::EngineId;

/// Profile file structure (kiln.toml).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub dir: DirectoryMapping,
    #[serde(default)]
    pub templates: TemplatesSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplatesSection {
    #[serde(default)]
    pub markdown: EngineId,
    #[serde(default)]
    pub html: EngineId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSection {
    /// Paths copied verbatim, relative to the project root
    #[serde(default = "default_passthrough")]
    pub passthrough: Vec<String>,

    /// Register the `htmlDateString` filter
    #[serde(default = "default_true")]
    pub date_filter: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passthrough_file_copy: Option<bool>,
}

fn default_passthrough() -> Vec<String> {
    vec!["src/robots.txt".to_string()]
}
fn default_true() -> bool {
    true
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            passthrough: default_passthrough(),
            date_filter: true,
            passthrough_file_copy: None,
        }
    }
}

/// Errors that can occur when loading a profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl Profile {
    /// Output to `docs`, copy `src/robots.txt`, register `htmlDateString`.
    pub fn docs() -> Self {
        Self::default()
    }

    /// Output to `_site` with no registrations.
    pub fn site() -> Self {
        Self {
            dir: DirectoryMapping {
                output: "_site".to_string(),
                ..Default::default()
            },
            templates: TemplatesSection::default(),
            build: BuildSection {
                passthrough: Vec::new(),
                date_filter: false,
                passthrough_file_copy: None,
            },
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a profile file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let profile = Self::from_toml(&content).map_err(|source| ProfileError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!("Loaded profile from {}", path.display());

        Ok(profile)
    }

    /// Load `path` if it exists, otherwise fall back to the default profile.
    /// A file that exists but is malformed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ProfileError> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!("No profile at {}, using defaults", path.display());
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_file_is_default_profile() {
        assert_eq!(Profile::from_toml("").unwrap(), Profile::default());
    }

    #[test]
    fn parses_full_profile() {
        let profile = Profile::from_toml(
            r#"
[dir]
input = "content"
output = "_site"

[templates]
markdown = "njk"
html = "njk"

[build]
passthrough = ["content/robots.txt", "content/img"]
date_filter = false
passthrough_file_copy = true
"#,
        )
        .unwrap();

        assert_eq!(profile.dir.input, "content");
        assert_eq!(profile.dir.output, "_site");
        assert_eq!(profile.dir.includes, "../_includes");
        assert_eq!(
            profile.build.passthrough,
            vec!["content/robots.txt", "content/img"]
        );
        assert!(!profile.build.date_filter);
        assert_eq!(profile.build.passthrough_file_copy, Some(true));
    }

    #[test]
    fn missing_build_keys_use_defaults() {
        let profile = Profile::from_toml("[build]\ndate_filter = false\n").unwrap();

        assert_eq!(profile.build.passthrough, vec!["src/robots.txt"]);
        assert!(!profile.build.date_filter);
    }

    #[test]
    fn load_or_default_without_file() {
        let temp = tempdir().unwrap();

        let profile = Profile::load_or_default(&temp.path().join("kiln.toml")).unwrap();

        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn load_reports_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("kiln.toml");
        fs::write(&path, "[dir\ninput = ").unwrap();

        let result = Profile::load_or_default(&path);

        assert!(matches!(result, Err(ProfileError::Parse { .. })));
    }

    #[test]
    fn profile_round_trips_through_toml() {
        let text = toml::to_string(&Profile::site()).unwrap();

        assert_eq!(Profile::from_toml(&text).unwrap(), Profile::site());
    }
}
