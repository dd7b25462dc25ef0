//! Location-aware resource search and map-marker reconciliation.
//!
//! Data flows one way: [`LocationProvider`] and the debounced query feed the
//! [`AppState`] reducer, which filters through [`SearchIndex`] and projects
//! the result through [`reconcile`] into a [`RenderModel`]. Side effects the
//! reducer asks for (live search, detail fetch, persisting the location)
//! are carried out by [`Finder`].

pub mod debounce;
pub mod driver;
pub mod links;
pub mod location;
pub mod reconcile;
pub mod search;
pub mod source;
pub mod state;
pub mod telephony;

pub use debounce::QueryDebouncer;
pub use driver::{Finder, Input};
pub use links::{dial_string, directions_url, tel_uri};
pub use location::{LocationProvider, LocationSource, PlatformError, PositionFix, PositionOptions};
pub use reconcile::{reconcile, Annotation, HydrationTicket, MarkerReconciler, RenderModel};
pub use search::SearchIndex;
pub use source::{MapDataSource, NetworkError, PlaceSearchSource};
pub use state::{AppState, DetailCard, Effect, Event};
pub use telephony::{call, DialError, Dialer};
