//! Static site builder: applies a site setup to a project root.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use walkdir::WalkDir;

use kiln_config::{Clock, EngineId, ResolvedDirs, SiteSetup, SystemClock};

use crate::passthrough::{collect_static_files, copy_path, copy_static_files, is_template};
use crate::templates::TemplateEnvironment;

/// Engine identifiers this host can serve. `njk` is rendered by minijinja.
pub const SUPPORTED_ENGINES: &[&str] = &["njk", "html", "md"];

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Files copied by passthrough rules
    pub passthrough_copied: usize,

    /// Files copied by whole-tree passthrough
    pub files_copied: usize,

    /// Include templates that compiled cleanly
    pub templates_checked: usize,

    /// Filters installed into the template environment
    pub filters: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Unsupported {kind} template engine: {engine}")]
    UnsupportedEngine { kind: &'static str, engine: String },

    #[error("Input directory not found: {0}")]
    MissingInput(String),

    #[error("Includes directory not found: {0}")]
    MissingIncludes(String),

    #[error("Passthrough source not found: {0}")]
    MissingPassthrough(String),

    #[error("Passthrough source must be a relative path inside the project: {0}")]
    PassthroughOutsideProject(String),

    #[error("Passthrough target {target} is outside the output directory {output}")]
    PassthroughOutsideOutput { target: String, output: String },

    #[error("Passthrough target overlaps its source: {0}")]
    PassthroughOntoSource(String),

    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Failed to load template {path}: {message}")]
    TemplateError { path: String, message: String },
}

/// Static site builder.
pub struct StaticBuilder {
    root: PathBuf,
    setup: SiteSetup,
    dirs: ResolvedDirs,
    clock: Arc<dyn Clock>,
}

impl StaticBuilder {
    /// Create a builder for the project at `root`.
    pub fn new(root: impl Into<PathBuf>, setup: SiteSetup) -> Self {
        let root = root.into();
        let dirs = setup.config.dir.resolve(&root);

        Self {
            root,
            setup,
            dirs,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock filters read "now" from.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn dirs(&self) -> &ResolvedDirs {
        &self.dirs
    }

    pub fn setup(&self) -> &SiteSetup {
        &self.setup
    }

    /// Template environment with the registered filters installed.
    pub fn templates(&self) -> TemplateEnvironment {
        TemplateEnvironment::new(&self.dirs.includes, &self.setup, self.clock.clone())
    }

    /// Build the static site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.check_engines()?;

        if !self.dirs.input.is_dir() {
            return Err(BuildError::MissingInput(
                self.dirs.input.display().to_string(),
            ));
        }

        if !self.dirs.includes.is_dir() {
            return Err(BuildError::MissingIncludes(
                self.dirs.includes.display().to_string(),
            ));
        }

        // Ensure output directory exists
        fs::create_dir_all(&self.dirs.output)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let templates = self.templates();
        let templates_checked = self.check_includes(&templates)?;

        let passthrough_copied = self.copy_passthrough()?;

        let files_copied = if self.setup.config.passthrough_file_copy == Some(true) {
            let excluded = [self.dirs.includes.as_path(), self.dirs.output.as_path()];
            let files = collect_static_files(&self.dirs.input, &excluded)?;
            copy_static_files(&files, &self.dirs.input, &self.dirs.output)?
        } else {
            0
        };

        let duration = start.elapsed();

        Ok(BuildResult {
            passthrough_copied,
            files_copied,
            templates_checked,
            filters: templates.filters().to_vec(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.dirs.output.clone(),
        })
    }

    fn check_engines(&self) -> Result<(), BuildError> {
        let config = &self.setup.config;

        check_engine("markdown", &config.markdown_template_engine)?;
        check_engine("html", &config.html_template_engine)
    }

    /// Compile every template under the includes root.
    fn check_includes(&self, templates: &TemplateEnvironment) -> Result<usize, BuildError> {
        let mut count = 0;

        for entry in WalkDir::new(&self.dirs.includes).follow_links(true) {
            let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_template(path) {
                continue;
            }

            let name = template_name(&self.dirs.includes, path);
            templates
                .check(&name)
                .map_err(|e| BuildError::TemplateError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            count += 1;
        }

        Ok(count)
    }

    /// Apply passthrough rules in registration order.
    fn copy_passthrough(&self) -> Result<usize, BuildError> {
        let dir = &self.setup.config.dir;
        let mut count = 0;

        for rule in self.setup.passthrough_rules() {
            if !rule.is_within_project() {
                return Err(BuildError::PassthroughOutsideProject(
                    rule.source().to_string(),
                ));
            }

            let (source, target) = rule.resolve(dir, &self.root);
            if !source.exists() {
                return Err(BuildError::MissingPassthrough(
                    source.display().to_string(),
                ));
            }

            if !target.starts_with(&self.dirs.output) {
                return Err(BuildError::PassthroughOutsideOutput {
                    target: target.display().to_string(),
                    output: self.dirs.output.display().to_string(),
                });
            }

            // fs::copy onto itself truncates the file
            if target.starts_with(&source) {
                return Err(BuildError::PassthroughOntoSource(
                    source.display().to_string(),
                ));
            }

            if !rule.is_under_input(dir) {
                tracing::warn!(
                    "Passthrough source {} is outside the input directory {}",
                    rule.source(),
                    dir.input
                );
            }

            count += copy_path(&source, &target)?;
            tracing::info!("Copied {} to {}", rule.source(), target.display());
        }

        Ok(count)
    }
}

fn check_engine(kind: &'static str, engine: &EngineId) -> Result<(), BuildError> {
    if SUPPORTED_ENGINES.contains(&engine.as_str()) {
        Ok(())
    } else {
        Err(BuildError::UnsupportedEngine {
            kind,
            engine: engine.to_string(),
        })
    }
}

/// Loader name of a template below the includes root, with `/` separators.
fn template_name(includes: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(includes).unwrap_or(path);

    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
