pub mod build;
pub mod config;
pub mod init;
pub mod render;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::Result;
use kiln_config::Profile;

/// Project root and profile location shared by every command.
pub struct ProjectArgs {
    pub root: PathBuf,
    pub profile_path: PathBuf,
}

impl ProjectArgs {
    pub fn new(root: PathBuf, config: PathBuf) -> Self {
        let profile_path = root.join(config);
        Self { root, profile_path }
    }

    /// Load the profile, applying directory overrides from the command line.
    pub fn load_profile(&self, output: Option<String>, input: Option<String>) -> Result<Profile> {
        let mut profile = Profile::load_or_default(&self.profile_path)?;

        if let Some(output) = output {
            profile.dir.output = output;
        }
        if let Some(input) = input {
            profile.dir.input = input;
        }

        Ok(profile)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
