//! Print the configuration record.

use anyhow::{Context, Result};
use kiln_config::{provide, Registration};

use super::ProjectArgs;

/// Run the config command.
pub fn run(project: &ProjectArgs, output: Option<String>) -> Result<()> {
    let profile = project.load_profile(output, None)?;
    let setup = provide(&profile);

    let json =
        serde_json::to_string_pretty(&setup.config).context("Failed to serialize config")?;
    println!("{}", json);

    for registration in &setup.registrations {
        match registration {
            Registration::Filter { name, .. } => tracing::info!("filter: {}", name),
            Registration::PassthroughCopy(rule) => {
                tracing::info!(
                    "passthrough: {} -> {}",
                    rule.source(),
                    rule.target(&setup.config.dir).display()
                )
            }
        }
    }

    Ok(())
}
