//! CLI entry point for rendering autostereograms from depth rasters

use autostereo::io::cli::{Cli, FileProcessor};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> autostereo::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
