//! Build-time registrations handed to the host alongside the configuration.

use std::path::{Component, Path, PathBuf};

use crate::dirs::{normalize, DirectoryMapping};

/// Filters the provider knows how to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFilter {
    /// Instant (or now) to `YYYY-MM-DD`
    HtmlDateString,
}

impl BuiltinFilter {
    /// The name templates use for this filter unless registered otherwise.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinFilter::HtmlDateString => "htmlDateString",
        }
    }
}

/// A file or directory copied verbatim from the input root to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughRule {
    /// Source path, relative to the project root (e.g. `src/robots.txt`)
    source: String,
}

impl PassthroughRule {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the source is a relative path that stays inside the project.
    pub fn is_within_project(&self) -> bool {
        let source = normalize(Path::new(&self.source));

        source.is_relative() && !matches!(source.components().next(), Some(Component::ParentDir))
    }

    /// Whether the source lies under the input root.
    pub fn is_under_input(&self, dirs: &DirectoryMapping) -> bool {
        normalize(Path::new(&self.source)).starts_with(input_prefix(dirs))
    }

    /// Where the source lands, relative to the project root.
    ///
    /// The input prefix is replaced by the output root; a source outside the
    /// input root keeps its whole path below the output root.
    pub fn target(&self, dirs: &DirectoryMapping) -> PathBuf {
        let source = normalize(Path::new(&self.source));
        let input = input_prefix(dirs);
        let output = normalize(Path::new(&dirs.output));

        let target = match source.strip_prefix(&input) {
            Ok(relative) => output.join(relative),
            Err(_) => output.join(source),
        };

        normalize(&target)
    }

    /// Source and target resolved against `root`, both normalised.
    pub fn resolve(&self, dirs: &DirectoryMapping, root: &Path) -> (PathBuf, PathBuf) {
        (
            normalize(&root.join(&self.source)),
            normalize(&root.join(self.target(dirs))),
        )
    }
}

/// Normalised input root; a `.` input is an empty prefix.
fn input_prefix(dirs: &DirectoryMapping) -> PathBuf {
    let input = normalize(Path::new(&dirs.input));

    if input == Path::new(".") {
        PathBuf::new()
    } else {
        input
    }
}

/// One effect for the host to apply, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Filter { name: String, filter: BuiltinFilter },
    PassthroughCopy(PassthroughRule),
}
