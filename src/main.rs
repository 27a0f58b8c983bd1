use clap::Parser;
use wirekit::cli::{run, Cli};
use wirekit::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    tracing::debug!("wirekit {} (built {})", wirekit::VERSION, wirekit::BUILD_DATE);

    run(&cli)
}
