use anyhow::Result;
use clap::Parser;

use desymm::cli::Cli;
use desymm::commands::{handle_desym, DesymConfig};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    handle_desym(DesymConfig { data: cli.data })
}
