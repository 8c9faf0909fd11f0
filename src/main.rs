use std::path::Path;

use clap::Parser;
use punchlist::cli::commands::Cli;
use punchlist::cli::session;
use punchlist::io::config_io;
use punchlist::store::ItemStore;

fn main() {
    let cli = Cli::parse();

    // Keep the handle alive so log output keeps flowing.
    let _logger = match punchlist::logging::init(cli.log_level.as_deref()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let config = match config_io::load_config(cli.config.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut store = ItemStore::new();
    if let Err(e) = session::run(&mut store, &config, cli.json) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
