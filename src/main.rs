use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use std::io;
use std::path::PathBuf;
use us_libraries::config::{Config, DEFAULT_CONFIG_FILE, Overrides};
use us_libraries::loader::Loader;
use us_libraries::menu::Menu;
use us_libraries::storage;

/// Canned reports over US public library statistics
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the seed files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Database file, or `:memory:`
    #[arg(long)]
    database: Option<PathBuf>,

    /// Seconds before the report cache is cleared
    #[arg(long)]
    ttl: Option<u64>,

    /// Seed empty tables before showing the menu
    #[arg(long)]
    seed: bool,

    /// Drop every table and seed from scratch
    #[arg(long)]
    reset: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?
        .with_overrides(&Overrides {
            data_dir: args.data_dir,
            database: args.database,
            cache_ttl_seconds: args.ttl,
        });
    info!("using database {}", config.database.display());

    let storage = storage::open(&config.database);
    let mut db = storage.load().context("Failed to load the database")?;

    let loader = Loader::new(&config.data_dir);
    if args.reset {
        info!("dropping every table before seeding");
        db.clear();
    }
    let seeded = if args.seed || args.reset {
        Some(loader.run(&mut db, storage.as_ref()))
    } else {
        loader.ensure_seeded(&mut db, storage.as_ref()).transpose()
    };
    if let Some(report) = seeded {
        let report = report.context("seeding the database")?;
        for (table, reason) in report.failures() {
            warn!("{} was not seeded: {}", table, reason);
        }
        println!("{}", report);
        if report.is_complete() {
            println!("The database is seeded successfully\n");
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Menu::new(&db, config.cache_ttl).run(stdin.lock(), &mut stdout)?;
    Ok(())
}
