//! Render a single includes template.

use std::sync::Arc;

use anyhow::{Context, Result};
use kiln_config::{parse_date, provide, Clock, FixedClock, SystemClock};
use kiln_static::StaticBuilder;
use minijinja::context;

use super::ProjectArgs;

/// Run the render command.
pub fn run(project: &ProjectArgs, template: &str, date: Option<&str>) -> Result<()> {
    let profile = project.load_profile(None, None)?;
    let setup = provide(&profile);

    let clock: Arc<dyn Clock> = match date {
        Some(date) => {
            let now = parse_date(date).with_context(|| format!("Invalid --date: {}", date))?;
            Arc::new(FixedClock(now))
        }
        None => Arc::new(SystemClock),
    };

    let builder = StaticBuilder::new(project.root(), setup).with_clock(clock);
    let config = &builder.setup().config;

    let html = builder
        .templates()
        .render(template, context! { config => config })
        .with_context(|| format!("Failed to render {}", template))?;

    print!("{}", html);

    Ok(())
}
