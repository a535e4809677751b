//! Print the origin × role grid of a catalog.

use clap::Parser;
use std::path::PathBuf;
use synergy::io_utils::{io_cli_error, synergy_cli_error};
use synergy::{trait_grid, Catalog};

#[derive(Parser)]
struct Args {
    /// Catalog JSON file; the built-in reference tables are used when absent
    catalog: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let catalog = match &args.catalog {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| io_cli_error("reading catalog", path, e))?;
            Catalog::from_json_str(&text).map_err(|e| synergy_cli_error("invalid catalog", e))?
        }
        None => Catalog::reference(),
    };
    log::debug!(
        "{} characters, {} traits",
        catalog.characters().len(),
        catalog.trait_count()
    );
    print!("{}", trait_grid(&catalog));
    Ok(())
}
