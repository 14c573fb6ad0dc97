//! Kiln CLI - static site build configuration and passthrough host.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::ProjectArgs;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Static site build configuration and passthrough host")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to kiln.toml profile, relative to the project root
    #[arg(short, long, default_value = "kiln.toml")]
    config: PathBuf,

    /// Project root
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default profile, input and includes directories
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Apply the configuration: passthrough copies, filters, include checks
    Build {
        /// Output directory (defaults to profile or "docs")
        #[arg(short, long)]
        output: Option<String>,

        /// Input directory (defaults to profile or "src")
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Print the configuration record as JSON
    Config {
        /// Output directory override
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render an includes template with the registered filters
    Render {
        /// Template name, relative to the includes directory
        template: String,

        /// Pin "now" to this date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory to serve (defaults to the profile output)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let project = ProjectArgs::new(cli.root, cli.config);

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&project, yes)?;
        }
        Commands::Build { output, input } => {
            commands::build::run(&project, output, input)?;
        }
        Commands::Config { output } => {
            commands::config::run(&project, output)?;
        }
        Commands::Render { template, date } => {
            commands::render::run(&project, &template, date.as_deref())?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(&project, port, dir).await?;
        }
    }

    Ok(())
}
