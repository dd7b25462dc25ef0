//! Plain-text rendering of finder state.

use std::fmt::Write;

use resfinder_finder::{AppState, DetailCard, MapDataSource};

/// `850 m` under a kilometre, `1.2 km` above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

pub fn results(state: &AppState) -> String {
    let mut out = String::new();
    let source = match state.source() {
        MapDataSource::Live => "live",
        MapDataSource::Offline => "offline catalog",
    };
    let model = state.render();

    match model.self_marker {
        Some(here) => {
            let _ = writeln!(out, "Your location: {here}");
        }
        None => {
            let _ = writeln!(out, "Searching around {}", state.effective_location());
        }
    }
    if let Some(reason) = state.banner() {
        let _ = writeln!(out, "! {reason}. Showing the default area.");
    }

    let _ = writeln!(
        out,
        "{} result(s) for {:?} from {source}:",
        model.annotations.len(),
        state.query()
    );
    for (i, pin) in model.annotations.iter().enumerate() {
        let label = pin.category.map_or("Place", |c| c.label());
        let distance = pin
            .distance_meters
            .map(|m| format!("  {}", format_distance(m)))
            .unwrap_or_default();
        let _ = writeln!(out, "{:>3}. {} [{label}] ({}){distance}", i + 1, pin.title, pin.id);
    }
    out
}

pub fn detail(card: &DetailCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.title);
    if let Some(category) = card.category {
        let _ = writeln!(out, "  {category}");
    }
    let fields = [
        ("Hours", card.hours.as_deref()),
        ("Address", card.address.as_deref()),
        ("Phone", card.phone.as_deref()),
        ("Call", card.tel_uri.as_deref()),
        ("Directions", card.directions_url.as_deref()),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "  {name}: {value}");
        }
    }
    if let Some(m) = card.distance_meters {
        let _ = writeln!(out, "  Distance: {}", format_distance(m));
    }
    out
}
