use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use synergy::io_utils::{io_cli_error, simple_cli_error, synergy_cli_error};
use synergy::{
    export_all, fingerprint, summarize, trait_grid, Catalog, Dummy, SearchConfig, SearchEngine,
    SearchResults, DEFAULT_HIGH_LEVEL_MIN, DEFAULT_TEAM_SIZE,
};

const RULE: &str =
    "================================================================================";

/// Find the teams activating the most traits for every high-level trait count.
#[derive(Parser)]
#[command(name = "synergy")]
struct Args {
    /// Number of characters per team
    #[arg(long, short = 'n', default_value_t = DEFAULT_TEAM_SIZE)]
    team_size: usize,
    /// Fixed dummy trait pair, e.g. noble+undead
    #[arg(long)]
    dummy: Option<String>,
    /// Catalog JSON file; the built-in reference tables are used when absent
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Smallest threshold counted as high level
    #[arg(long, default_value_t = DEFAULT_HIGH_LEVEL_MIN)]
    high_level_min: u32,
    /// Directory receiving the CSV files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Base name of the CSV files (defaults to e.g. 6chars or 6chars_with_dummy)
    #[arg(long)]
    base: Option<String>,
    /// Print the full result as JSON instead of the text summary
    #[arg(long)]
    json: bool,
    /// Hide the progress bar and the trait grid
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => {
            let text =
                fs::read_to_string(path).map_err(|e| io_cli_error("reading catalog", path, e))?;
            Catalog::from_json_str(&text).map_err(|e| synergy_cli_error("invalid catalog", e))?
        }
        None => Catalog::reference(),
    };

    let mut config = SearchConfig::new(args.team_size);
    config.high_level_min = args.high_level_min;
    if let Some(d) = &args.dummy {
        let dummy: Dummy = d
            .parse()
            .map_err(|e| synergy_cli_error("invalid --dummy", e))?;
        config = config.with_dummy(dummy);
    }
    if !args.out_dir.is_dir() {
        return Err(simple_cli_error(&format!(
            "output directory '{}' does not exist",
            args.out_dir.display()
        ))
        .into());
    }
    let engine =
        SearchEngine::new(&catalog, &config).map_err(|e| synergy_cli_error("invalid options", e))?;

    if !args.json {
        if !args.quiet {
            println!("{RULE}\nCHARACTER TRAIT GRID\n{RULE}");
            print!("{}", trait_grid(&catalog));
        }
        println!("{RULE}");
        println!("Number of characters: {}", config.team_size);
        match &config.dummy {
            Some(d) => println!("Dummy: {d}"),
            None => println!("Dummy: None"),
        }
        println!("{RULE}");
    }

    let start_time = Instant::now();
    let results = search_with_progress(&engine, args.quiet || args.json)?;
    let elapsed = start_time.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("\n{RULE}\nRESULTS BY HIGH-LEVEL TRAIT COUNT\n{RULE}");
        if results.is_empty() {
            println!("\nNo team of {} characters found.", config.team_size);
        }
        print!("{}", summarize(&results));
        println!("\nFingerprint: {}", fingerprint(&results));
        println!("Search time: {:.2?}", elapsed);
    }

    let base = args.base.clone().unwrap_or_else(|| config.base_name());
    let written = export_all(&results, &args.out_dir, &base)
        .map_err(|e| synergy_cli_error("exporting teams", e))?;
    if !args.json {
        println!("\n{RULE}\nEXPORTED\n{RULE}");
        for path in written {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

fn search_with_progress(
    engine: &SearchEngine<'_>,
    hidden: bool,
) -> Result<SearchResults, Box<dyn std::error::Error>> {
    let max_k = engine.max_high_level();
    let bar = if hidden {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(max_k as u64 + 1);
        bar.set_style(ProgressStyle::with_template(
            "{spinner} [{bar:30}] {pos}/{len} categories {msg}",
        )?);
        bar
    };

    let mut categories = Vec::with_capacity(max_k + 1);
    for k in 0..=max_k {
        bar.set_message(format!("searching {k}l2"));
        categories.push(engine.search_category(k));
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(SearchResults::from_categories(categories))
}
