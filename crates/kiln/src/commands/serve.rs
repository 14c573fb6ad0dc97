//! Preview server command.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use kiln_config::provide;
use tower_http::services::ServeDir;

use super::ProjectArgs;

/// Run the serve command.
pub async fn run(project: &ProjectArgs, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => {
            let setup = provide(&project.load_profile(None, None)?);
            setup.config.dir.resolve(project.root()).output
        }
    };

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'kiln build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!("Serving {} at http://{}", dir.display(), addr);

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Open browser
    let url = format!("http://{}", addr);
    let _ = open::that(&url);

    axum::serve(listener, app).await?;

    Ok(())
}
