//! Build host for kiln sites.
//!
//! Applies a [`kiln_config::SiteSetup`] to a project: resolves directories,
//! copies passthrough files and installs registered filters into the template
//! environment.

pub mod builder;
pub mod passthrough;
pub mod templates;

pub use builder::{BuildError, BuildResult, StaticBuilder, SUPPORTED_ENGINES};
pub use passthrough::{is_template, TEMPLATE_EXTENSIONS};
pub use templates::TemplateEnvironment;
