//! Interactive `browse` command: stdin lines stand in for the search box.
//!
//! Plain lines are typed into the box and debounced. Lines starting with
//! `:` are actions: `:open <id>`, `:me`, `:close`, `:online`, `:offline`,
//! `:retry`, `:dismiss`, `:clear`.

use std::sync::Arc;

use resfinder_core::{AppConfig, Record, ResourceCatalog};
use resfinder_finder::{AppState, Event, Finder, Input, LocationProvider};
use resfinder_store::{load_last_known_location, JsonFileStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

use crate::device::FlagLocation;
use crate::render;
use crate::search::places_client;

/// A parsed stdin line. `Open` needs the current records, so it is resolved
/// against state before being sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Input(Input),
    Open(String),
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let Some(action) = line.trim().strip_prefix(':') else {
        return Command::Input(Input::Type(line.trim().to_string()));
    };
    let mut parts = action.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();
    let event = match verb {
        "open" if !arg.is_empty() => return Command::Open(arg.to_string()),
        "me" => Event::SelectSelf,
        "close" => Event::Deselect,
        "online" => Event::ConnectivityChanged(true),
        "offline" => Event::ConnectivityChanged(false),
        "retry" => Event::RetryLocation,
        "dismiss" => Event::DismissBanner,
        "clear" => return Command::Input(Input::CancelTyping),
        _ => return Command::Unknown(line.trim().to_string()),
    };
    Command::Input(Input::Event(event))
}

pub async fn run_browse(
    config: &AppConfig,
    catalog: Arc<ResourceCatalog>,
    offline: bool,
    source: FlagLocation,
) -> anyhow::Result<()> {
    let store = JsonFileStore::open(config.store_path());
    let last_known = load_last_known_location(&store);
    let places = places_client(config, offline)?;

    let state = AppState::new(catalog, config.default_location)
        .with_live_search(places.is_some())
        .with_online(!offline)
        .with_last_known(last_known);
    let location = LocationProvider::new(source, config.default_location).with_last_known(last_known);
    let mut finder = Finder::new(state, location, places, store, config.search_radius_meters);

    let (tx, rx) = mpsc::unbounded_channel();
    // Records are needed to turn `:open <id>` into a selection; the render
    // callback keeps a copy for the reader task.
    let (records_tx, records_rx) = watch::channel(Vec::<Record>::new());

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let input = match parse_line(&line) {
                Command::Input(input) => input,
                Command::Open(id) => {
                    let found = records_rx.borrow().iter().find(|r| r.id() == id).cloned();
                    match found {
                        Some(record) => Input::Event(Event::Select(record)),
                        None => {
                            eprintln!("no result with id {id:?}");
                            continue;
                        }
                    }
                }
                Command::Unknown(text) => {
                    eprintln!("unknown action {text:?}");
                    continue;
                }
            };
            if tx.send(input).is_err() {
                break;
            }
        }
    });

    let mut last_records = Vec::new();
    let mut last_card = None;
    finder
        .run(rx, config.debounce_interval(), |state| {
            if state.records() != last_records.as_slice() {
                last_records = state.records().to_vec();
                let _ = records_tx.send(last_records.clone());
                print!("{}", render::results(state));
            }
            let card = state.detail_card();
            if card != last_card {
                if let Some(card) = &card {
                    print!("{}", render::detail(card));
                }
                last_card = card;
            }
        })
        .await;

    Ok(())
}
