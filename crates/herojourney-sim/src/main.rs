//! Hero Journey headless driver entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use herojourney_content::application::catalog_service::CatalogService;
use herojourney_core::clock::{Clock, SystemClock};
use herojourney_core::config::EngineConfig;
use herojourney_core::rng::{DeterministicRng, StdRngSource};
use herojourney_rules::domain::balance::analyze_balance;
use herojourney_save_store::file_save_repository::FileSaveRepository;
use herojourney_session::application::command_handlers::handle_load_game;
use herojourney_session::domain::commands::LoadGame;
use herojourney_session::domain::playthrough::Playthrough;
use herojourney_sim::driver::autoplay;
use herojourney_sim::error::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Background id for a new hero
    #[arg(env = "HEROJOURNEY_BACKGROUND")]
    background: Option<String>,

    /// Resume the save in this slot instead of starting a new hero
    #[arg(long)]
    resume: Option<u32>,

    /// Seed the random source for a reproducible run
    #[arg(long, env = "HEROJOURNEY_SEED")]
    seed: Option<u64>,

    /// Print the content balance analysis and exit
    #[arg(long)]
    balance: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = EngineConfig::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let catalog = CatalogService::from_config(&config, Arc::clone(&clock)).catalog();

    if args.balance {
        println!("{}", analyze_balance(&catalog, config.horizon));
        return Ok(());
    }

    if args.resume.is_some() && args.background.is_some() {
        return Err(AppError::Config(
            "a background cannot be chosen when resuming a save".to_owned(),
        ));
    }

    let rng: Box<dyn DeterministicRng> = match args.seed {
        Some(seed) => Box::new(StdRngSource::seeded(seed)),
        None => Box::new(StdRngSource::from_os_rng()),
    };
    let repo = FileSaveRepository::new(&config.save_dir);

    let mut playthrough = match args.resume {
        Some(slot) => handle_load_game(
            &LoadGame { slot },
            catalog,
            &config,
            rng,
            clock.as_ref(),
            &repo,
        )?,
        None => Playthrough::new(
            catalog,
            &config,
            args.background.as_deref(),
            rng,
            clock.now(),
        ),
    };

    tracing::info!(
        playthrough_id = %playthrough.id(),
        background_id = playthrough.background_id(),
        round = playthrough.round(),
        "playing"
    );
    let ending = autoplay(&mut playthrough, &config, clock.as_ref(), &repo)?;

    println!("{}", ending.text);
    println!("Months survived: {}", ending.months);
    Ok(())
}
