use abstract_pattern::batch;
use abstract_pattern::config::Cli;
use abstract_pattern::logging::init_logging;
use clap::Parser;
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    info!("Abstract B&W Image Generator");
    let report = batch::run(&cli.batch_config())?;

    if report.success() {
        info!("Generation complete! Images are ready to use.");
        Ok(())
    } else {
        warn!("No images were generated.");
        std::process::exit(1);
    }
}
