use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use deck2trice::{config, load_deck_file, Config, Deck2TriceBuilder, Deck2TriceError, SyncReport};
use log::{error, info};

/// Fetch decklists from Moxfield or Archidekt and save them as Cockatrice decks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Fetch and parse decks without writing anything
    #[arg(long)]
    dryrun: bool,

    /// Where to save decklists
    #[arg(long)]
    deckpath: Option<PathBuf>,

    /// Deck source to use: moxfield or archidekt. Overrides the config file
    #[arg(long)]
    source: Option<String>,

    /// Username to fetch decks from. Overrides the config file
    #[arg(long)]
    username: Option<String>,

    /// Fetch every deck of the user, ignoring the config file's deck list
    #[arg(long, alias = "all_decks")]
    all_decks: bool,

    /// Neither read nor write the config file. Requires --source and --username
    #[arg(long, alias = "no_config")]
    no_config: bool,

    /// Convert saved deck JSON (optionally .gz) instead of fetching
    #[arg(long, value_name = "FILE")]
    input: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            for (label, e) in &report.failed {
                error!("{}: {}", label, e);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> deck2trice::Result<SyncReport> {
    let config_path = config::config_path();
    let mut settings = if args.no_config {
        if args.input.is_empty() && (args.source.is_none() || args.username.is_none()) {
            return Err(Deck2TriceError::InvalidArgument(
                "--no-config requires both --source and --username".into(),
            ));
        }
        Config::default()
    } else {
        Config::load(&config_path)?
    };

    if let Some(source) = &args.source {
        settings.source = source.clone();
    }
    if let Some(username) = &args.username {
        settings.username = username.clone();
    }
    if let Some(deckpath) = &args.deckpath {
        settings.deckpath = deckpath.display().to_string();
    }
    if args.no_config || args.all_decks || settings.decks.is_empty() {
        settings.fetch_all = true;
        settings.decks.clear();
    }
    let provider = settings.provider()?;

    if !args.no_config {
        let overridden = args.source.is_some() || args.username.is_some() || args.deckpath.is_some();
        if overridden || !config_path.exists() {
            settings.save(&config_path)?;
            info!("Configuration saved to {}", config_path.display());
        }
    }

    let mut converter = Deck2TriceBuilder::from_config(&settings)?
        .dry_run(args.dryrun)
        .build()?;
    info!("Using deck source: {}", provider);
    info!("Saving decks to: {}", converter.deck_dir().display());

    if args.input.is_empty() {
        return converter.sync();
    }

    let mut raws = Vec::new();
    let mut unreadable = Vec::new();
    for path in &args.input {
        match load_deck_file(path) {
            Ok(raw) => raws.push(raw),
            Err(e) => unreadable.push((path.display().to_string(), e)),
        }
    }
    let mut report = converter.convert_all(&raws);
    report.failed.extend(unreadable);
    Ok(report)
}
