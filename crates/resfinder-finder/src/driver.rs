//! Executes reducer effects against the device, the places provider, and
//! the store, feeding each outcome back into [`AppState`].

use std::collections::VecDeque;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use resfinder_core::Coordinate;
use resfinder_store::{save_last_known_location, KeyValueStore};
use tokio::sync::mpsc;

use crate::debounce::QueryDebouncer;
use crate::location::{LocationProvider, LocationSource};
use crate::source::{NetworkError, PlaceSearchSource};
use crate::state::{AppState, Effect, Event};

/// What a front end sends into [`Finder::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Raw search-box text; debounced before it reaches the state.
    Type(String),
    /// Drop search-box text that has not settled yet.
    CancelTyping,
    Event(Event),
}

pub struct Finder<L, P, S> {
    state: AppState,
    location: LocationProvider<L>,
    places: Option<P>,
    store: S,
    radius_meters: u32,
}

impl<L, P, S> Finder<L, P, S>
where
    L: LocationSource,
    P: PlaceSearchSource,
    S: KeyValueStore,
{
    pub fn new(
        state: AppState,
        location: LocationProvider<L>,
        places: Option<P>,
        store: S,
        radius_meters: u32,
    ) -> Self {
        Self {
            state,
            location,
            places,
            store,
            radius_meters,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply `event`, then run every effect it produces (and every effect
    /// their outcomes produce) to completion, one at a time.
    pub async fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.state.apply(event) {
                if let Effect::PersistLocation(here) = effect {
                    persist_location(&mut self.store, here);
                    continue;
                }
                let outcome = perform(
                    &self.location,
                    self.places.as_ref(),
                    self.radius_meters,
                    effect,
                )
                .await;
                queue.extend(outcome);
            }
        }
    }

    /// Drive the finder from a stream of front-end inputs until the input
    /// channel closes and all outstanding work has settled.
    ///
    /// Location acquisition starts immediately. Effects run concurrently;
    /// their outcomes are applied in completion order, and the reducer
    /// discards any that went stale in the meantime. `on_change` sees the
    /// state after every applied event.
    pub async fn run<F>(
        &mut self,
        mut inputs: mpsc::UnboundedReceiver<Input>,
        quiet: Duration,
        mut on_change: F,
    ) where
        F: FnMut(&AppState),
    {
        let (debouncer, mut settled) = QueryDebouncer::spawn(quiet);
        let mut debouncer = Some(debouncer);

        let Self {
            state,
            location,
            places,
            store,
            radius_meters,
        } = self;
        let location = &*location;
        let places = places.as_ref();
        let radius = *radius_meters;

        let mut pending = FuturesUnordered::new();
        pending.push(perform(location, places, radius, Effect::AcquireLocation));

        loop {
            let event = tokio::select! {
                input = inputs.recv(), if debouncer.is_some() => match input {
                    Some(Input::Type(text)) => {
                        if let Some(d) = &debouncer {
                            d.push(text);
                        }
                        continue;
                    }
                    Some(Input::CancelTyping) => {
                        if let Some(d) = &debouncer {
                            d.cancel();
                        }
                        continue;
                    }
                    Some(Input::Event(event)) => event,
                    None => {
                        tracing::debug!("input closed; draining outstanding work");
                        debouncer = None;
                        continue;
                    }
                },
                Some(query) = settled.recv() => Event::QuerySettled(query),
                Some(outcome) = pending.next(), if !pending.is_empty() => match outcome {
                    Some(event) => event,
                    None => continue,
                },
                else => break,
            };

            for effect in state.apply(event) {
                match effect {
                    Effect::PersistLocation(here) => persist_location(&mut *store, here),
                    other => pending.push(perform(location, places, radius, other)),
                }
            }
            on_change(state);
        }
    }
}

/// Run one asynchronous effect. `PersistLocation` is written by the caller
/// and yields nothing here.
async fn perform<L, P>(
    location: &LocationProvider<L>,
    places: Option<&P>,
    radius_meters: u32,
    effect: Effect,
) -> Option<Event>
where
    L: LocationSource,
    P: PlaceSearchSource,
{
    match effect {
        Effect::AcquireLocation => Some(Event::LocationUpdated(location.acquire().await)),
        Effect::LiveSearch { seq, query, origin } => {
            let outcome = match places {
                Some(p) => p.nearby(origin, radius_meters, &query).await,
                None => Err(NetworkError),
            };
            Some(Event::LiveSearchCompleted { seq, outcome })
        }
        Effect::FetchDetails(ticket) => {
            let outcome = match places {
                Some(p) => p.details(ticket.place_id()).await,
                None => Err(NetworkError),
            };
            Some(Event::DetailsFetched { ticket, outcome })
        }
        Effect::PersistLocation(_) => None,
    }
}

fn persist_location<S: KeyValueStore + ?Sized>(store: &mut S, here: Coordinate) {
    if let Err(e) = save_last_known_location(store, here) {
        tracing::warn!(error = %e, "failed to persist last known location");
    }
}
