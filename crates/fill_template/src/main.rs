use anyhow::Result;
use tracing::debug;

use fill_template::{cli, commands, config::AppConfig, logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = AppConfig::from_matches(&matches)?;

    logging::init(config.verbose);
    debug!(?config, "resolved configuration");

    commands::run(&config)
}
