//! anchorprobe CLI — anchor text extraction for Elementor blog posts.
//!
//! Fetches one page and lists the text of every link inside its
//! post-content widget.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
