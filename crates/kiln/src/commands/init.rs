//! Initialize a kiln project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::ProjectArgs;

/// Run the init command.
pub fn run(project: &ProjectArgs, yes: bool) -> Result<()> {
    tracing::info!("Initializing kiln...");

    let root = project.root();

    for dir in ["src", "_includes"] {
        fs::create_dir_all(root.join(dir))
            .with_context(|| format!("Failed to create {} directory", dir))?;
    }

    write_file(&project.profile_path, DEFAULT_PROFILE, yes)?;
    write_file(&root.join("src/robots.txt"), DEFAULT_ROBOTS, yes)?;
    write_file(&root.join("_includes/sitemap.njk"), DEFAULT_SITEMAP, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'kiln build' to populate the output directory.");

    Ok(())
}

/// Write `content` unless the file exists and `overwrite` is false.
fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_PROFILE: &str = r#"# Kiln Configuration

[dir]
# Source content
input = "src"

# Generated site
output = "docs"

# Layouts and partials, relative to input
includes = "../_includes"

[templates]
markdown = "njk"
html = "njk"

[build]
# Files copied verbatim to the output directory
passthrough = ["src/robots.txt"]

# Register the htmlDateString filter
date_filter = true
"#;

const DEFAULT_ROBOTS: &str = "User-agent: *\nAllow: /\n";

const DEFAULT_SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>/</loc>
    <lastmod>{{ none | htmlDateString }}</lastmod>
  </url>
</urlset>
"#;
