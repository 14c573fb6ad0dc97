//! Directory mapping between source content, generated output and includes.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The three roots a build reads from and writes to.
///
/// `includes` is expressed relative to `input`, never to the working
/// directory: `src` + `../_includes` points at `<root>/_includes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryMapping {
    /// Source content root
    #[serde(default = "default_input")]
    pub input: String,

    /// Generated site root
    #[serde(default = "default_output")]
    pub output: String,

    /// Shared layouts and partials, relative to `input`
    #[serde(default = "default_includes")]
    pub includes: String,
}

fn default_input() -> String {
    "src".to_string()
}
fn default_output() -> String {
    "docs".to_string()
}
fn default_includes() -> String {
    "../_includes".to_string()
}

impl Default for DirectoryMapping {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            includes: default_includes(),
        }
    }
}

/// Directory mapping resolved against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub includes: PathBuf,
}

impl DirectoryMapping {
    /// Resolve the mapping against `root`.
    ///
    /// Purely lexical: nothing is read from disk and symlinks are not followed.
    pub fn resolve(&self, root: &Path) -> ResolvedDirs {
        let input = normalize(&root.join(&self.input));
        let includes = normalize(&input.join(&self.includes));
        let output = normalize(&root.join(&self.output));

        ResolvedDirs {
            input,
            output,
            includes,
        }
    }
}

/// Lexically normalise a path, folding `.` and `..` components.
///
/// Leading `..` on a relative path are kept; `..` never climbs above a root.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }

    out
}
