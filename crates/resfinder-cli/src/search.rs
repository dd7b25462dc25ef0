//! One-shot `search` command.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use resfinder_core::{AppConfig, Category, ResourceCatalog};
use resfinder_finder::{AppState, Event, Finder, LocationProvider};
use resfinder_places::PlacesClient;
use resfinder_store::{load_last_known_location, JsonFileStore};

use crate::device::FlagLocation;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Police,
    Hospital,
    FoodBank,
    Shelter,
    LegalAid,
    Transit,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Police => Category::Police,
            CategoryArg::Hospital => Category::Hospital,
            CategoryArg::FoodBank => Category::FoodBank,
            CategoryArg::Shelter => Category::Shelter,
            CategoryArg::LegalAid => Category::LegalAid,
            CategoryArg::Transit => Category::Transit,
        }
    }
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query (name, address, or category)
    pub query: Option<String>,
    /// Search by category instead of free text
    #[arg(long, value_enum, conflicts_with = "query")]
    pub category: Option<CategoryArg>,
    /// Never use the live places provider
    #[arg(long)]
    pub offline: bool,
    /// Device latitude (omit to simulate a device without geolocation)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Device longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Open the result with this id and show its details
    #[arg(long)]
    pub details: Option<String>,
}

impl SearchArgs {
    /// The text that would have been typed into the search box.
    pub fn query_text(&self) -> String {
        match (&self.query, self.category) {
            (Some(q), _) => q.trim().to_string(),
            (None, Some(category)) => Category::from(category).keyword().to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Build the live client when a key is configured and the user allows it.
pub fn places_client(config: &AppConfig, offline: bool) -> anyhow::Result<Option<PlacesClient>> {
    if offline {
        return Ok(None);
    }
    let client = config
        .places_api_key
        .as_deref()
        .map(|key| PlacesClient::with_base_url(key, config.places_timeout_secs, &config.places_base_url))
        .transpose()?;
    Ok(client)
}

pub async fn run_search(
    config: &AppConfig,
    catalog: Arc<ResourceCatalog>,
    args: SearchArgs,
) -> anyhow::Result<()> {
    let store = JsonFileStore::open(config.store_path());
    let last_known = load_last_known_location(&store);
    let places = places_client(config, args.offline)?;

    let state = AppState::new(catalog, config.default_location)
        .with_live_search(places.is_some())
        .with_online(!args.offline)
        .with_last_known(last_known);
    let location = LocationProvider::new(FlagLocation::from_args(args.lat, args.lng), config.default_location)
        .with_last_known(last_known);
    let mut finder = Finder::new(state, location, places, store, config.search_radius_meters);

    finder.dispatch(Event::RetryLocation).await;
    finder.dispatch(Event::QuerySettled(args.query_text())).await;
    print!("{}", render::results(finder.state()));

    if let Some(id) = args.details {
        let Some(record) = finder.state().records().iter().find(|r| r.id() == id).cloned() else {
            anyhow::bail!("no result with id {id:?}");
        };
        finder.dispatch(Event::Select(record)).await;
        if let Some(card) = finder.state().detail_card() {
            println!();
            print!("{}", render::detail(&card));
        }
    }

    Ok(())
}
