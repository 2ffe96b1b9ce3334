//! Serves the blog admin.
//!
//! ```bash
//! cargo run --package inline-actions-blog -- --bind 127.0.0.1:8000
//! ```
//!
//! Then open `http://127.0.0.1:8000/admin/blog/author/1/change/`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use django_rs_inline_actions::logging::setup_logging;
use inline_actions_blog::settings::load_settings;
use inline_actions_blog::{build_router, build_state};

/// Blog admin demonstrating inline actions.
#[derive(Debug, Parser)]
#[command(name = "inline-actions-blog", version)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    setup_logging(&settings);

    let app = build_router(build_state(&settings).await?);
    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    tracing::info!(addr = %cli.bind, "serving blog admin");
    axum::serve(listener, app).await?;
    Ok(())
}
