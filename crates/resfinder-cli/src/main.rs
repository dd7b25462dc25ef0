mod browse;
mod contacts;
mod device;
mod render;
mod search;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use resfinder_core::{load_catalog, AppConfig, Category, ResourceCatalog, HOTLINES, SUGGESTED_SEARCHES};
use resfinder_finder::{call, tel_uri, LocationProvider};
use resfinder_store::{save_last_known_location, JsonFileStore};
use tracing_subscriber::EnvFilter;

use crate::contacts::ContactsCommands;
use crate::device::{ConsoleDialer, FlagLocation};
use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "resfinder")]
#[command(about = "Find nearby emergency resources and manage emergency contacts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List resource categories and suggested searches
    Categories,
    /// List national hotlines
    Hotlines,
    /// Search nearby resources once and print the results
    Search(SearchArgs),
    /// Interactive search: each stdin line is typed into the search box
    Browse {
        /// Never use the live places provider
        #[arg(long)]
        offline: bool,
        /// Device latitude (omit to simulate a device without geolocation)
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Device longitude
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },
    /// Manage emergency contacts
    Contacts {
        #[command(subcommand)]
        command: ContactsCommands,
    },
    /// Place a call to a phone number
    Call {
        /// Number to dial, any formatting
        number: String,
    },
    /// Resolve the device location and remember it
    Locate {
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = resfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("resfinder ready; run `resfinder --help` for commands");
        return Ok(());
    };

    tracing::debug!(env = %config.env, live = config.live_search_enabled(), "starting");

    match command {
        Commands::Categories => {
            let catalog = load_catalog(config.catalog_path.as_deref())?;
            print_categories(&catalog);
        }
        Commands::Hotlines => print_hotlines(),
        Commands::Search(args) => {
            let catalog = Arc::new(load_catalog(config.catalog_path.as_deref())?);
            search::run_search(&config, catalog, args).await?;
        }
        Commands::Browse { offline, lat, lng } => {
            let catalog = Arc::new(load_catalog(config.catalog_path.as_deref())?);
            browse::run_browse(&config, catalog, offline, FlagLocation::from_args(lat, lng)).await?;
        }
        Commands::Contacts { command } => contacts::run_contacts(&config, command)?,
        Commands::Call { number } => {
            if call(&ConsoleDialer, &number).is_none() {
                anyhow::bail!("{number:?} has no digits to dial");
            }
        }
        Commands::Locate { lat, lng } => locate(&config, FlagLocation::from_args(lat, lng)).await?,
    }

    Ok(())
}

fn print_categories(catalog: &ResourceCatalog) {
    for category in Category::ALL {
        println!(
            "{:<18} {:>3} listed  (live keyword: {})",
            category.label(),
            catalog.in_category(category).count(),
            category.keyword()
        );
    }
    println!();
    println!("Suggested searches: {}", SUGGESTED_SEARCHES.join(", "));
}

fn print_hotlines() {
    for hotline in HOTLINES {
        let uri = tel_uri(hotline.number).unwrap_or_default();
        println!("{:<40} {:<14} {uri}", hotline.name, hotline.number);
    }
}

async fn locate(config: &AppConfig, source: FlagLocation) -> anyhow::Result<()> {
    let mut store = JsonFileStore::open(config.store_path());
    let last_known = resfinder_store::load_last_known_location(&store);
    let provider = LocationProvider::new(source, config.default_location).with_last_known(last_known);

    let state = provider.acquire().await;
    match state.coordinate() {
        Some(here) => {
            save_last_known_location(&mut store, here)?;
            println!("Your location: {here}");
        }
        None => {
            let reason = state
                .error()
                .map_or_else(|| "Location unresolved".to_string(), |e| e.to_string());
            println!("{reason}. Using {}", provider.effective_coordinate());
        }
    }
    Ok(())
}
