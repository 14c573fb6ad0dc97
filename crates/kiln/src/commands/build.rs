//! Static site build command.

use anyhow::Result;
use kiln_config::provide;
use kiln_static::StaticBuilder;

use super::ProjectArgs;

/// Run the build command.
pub fn run(project: &ProjectArgs, output: Option<String>, input: Option<String>) -> Result<()> {
    tracing::info!("Building static site...");

    let profile = project.load_profile(output, input)?;
    let setup = provide(&profile);

    let result = StaticBuilder::new(project.root(), setup).build()?;

    tracing::info!(
        "Copied {} passthrough and {} static files, checked {} templates in {}ms",
        result.passthrough_copied,
        result.files_copied,
        result.templates_checked,
        result.duration_ms
    );

    if !result.filters.is_empty() {
        tracing::info!("Filters: {}", result.filters.join(", "));
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn builds_initialised_project() {
        let temp = tempdir().unwrap();
        let project = ProjectArgs::new(temp.path().to_path_buf(), PathBuf::from("kiln.toml"));

        crate::commands::init::run(&project, false).unwrap();
        run(&project, None, None).unwrap();

        assert_eq!(
            fs::read(temp.path().join("docs/robots.txt")).unwrap(),
            fs::read(temp.path().join("src/robots.txt")).unwrap()
        );
    }
}
