//! Device geolocation with timeout, cached-fix reuse, and a fallback chain.
//!
//! [`LocationProvider::acquire`] never fails: every platform outcome is
//! folded into a [`LocationState`]. When nothing has resolved,
//! [`LocationProvider::effective_coordinate`] falls back to the last known
//! location and then to the configured default.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use resfinder_core::{Coordinate, LocationError, LocationState};
use tokio::time::Instant;

/// Options handed to the platform with every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// A fix younger than this is reused instead of asking for a fresh one.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(300),
        }
    }
}

/// Raw numbers reported by the platform, not yet range-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// The device has no geolocation capability.
    Unsupported,
    /// A platform error code (1 = denied, 2 = unavailable, 3 = timeout).
    Code(u16),
}

/// One-shot device position query.
pub trait LocationSource {
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<PositionFix, PlatformError>>;
}

#[derive(Debug, Clone, Copy)]
struct CachedFix {
    coordinate: Coordinate,
    at: Instant,
}

#[derive(Debug)]
struct Inner {
    state: LocationState,
    cached: Option<CachedFix>,
    last_known: Option<Coordinate>,
}

pub struct LocationProvider<L> {
    source: L,
    options: PositionOptions,
    default: Coordinate,
    inner: Mutex<Inner>,
}

impl<L: LocationSource> LocationProvider<L> {
    pub fn new(source: L, default: Coordinate) -> Self {
        Self {
            source,
            options: PositionOptions::default(),
            default,
            inner: Mutex::new(Inner {
                state: LocationState::Unresolved,
                cached: None,
                last_known: None,
            }),
        }
    }

    /// Seed the fallback chain with a coordinate persisted by an earlier run.
    #[must_use]
    pub fn with_last_known(self, last_known: Option<Coordinate>) -> Self {
        self.lock().last_known = last_known;
        self
    }

    #[must_use]
    pub fn options(&self) -> PositionOptions {
        self.options
    }

    /// Ask the platform for a position and record the outcome.
    ///
    /// A fix cached within `maximum_age` is returned without touching the
    /// platform. Otherwise one request is made, bounded by `timeout`.
    pub async fn acquire(&self) -> LocationState {
        if let Some(coordinate) = self.fresh_cached_fix() {
            tracing::debug!(%coordinate, "reusing cached position fix");
            return self.record(LocationState::Resolved(coordinate));
        }

        let outcome =
            tokio::time::timeout(self.options.timeout, self.source.current_position(&self.options))
                .await;

        let state = match outcome {
            Err(_) => LocationState::Failed(LocationError::Timeout),
            Ok(Err(PlatformError::Unsupported)) => LocationState::Failed(LocationError::Unsupported),
            Ok(Err(PlatformError::Code(code))) => {
                LocationState::Failed(LocationError::from_platform_code(code))
            }
            Ok(Ok(fix)) => match Coordinate::clamped(fix.latitude, fix.longitude) {
                Some(coordinate) => {
                    self.lock().cached = Some(CachedFix {
                        coordinate,
                        at: Instant::now(),
                    });
                    LocationState::Resolved(coordinate)
                }
                None => {
                    tracing::warn!(
                        latitude = fix.latitude,
                        longitude = fix.longitude,
                        "platform reported a non-finite position"
                    );
                    LocationState::Failed(LocationError::Unavailable)
                }
            },
        };

        match &state {
            LocationState::Resolved(c) => tracing::info!(coordinate = %c, "location resolved"),
            LocationState::Failed(e) => tracing::warn!(reason = %e, "location acquisition failed"),
            LocationState::Unresolved => {}
        }

        self.record(state)
    }

    #[must_use]
    pub fn state(&self) -> LocationState {
        self.lock().state
    }

    /// Resolved coordinate, else the last known one, else the default.
    #[must_use]
    pub fn effective_coordinate(&self) -> Coordinate {
        let inner = self.lock();
        inner
            .state
            .coordinate()
            .or(inner.last_known)
            .unwrap_or(self.default)
    }

    fn fresh_cached_fix(&self) -> Option<Coordinate> {
        let cached = self.lock().cached?;
        (cached.at.elapsed() < self.options.maximum_age).then_some(cached.coordinate)
    }

    fn record(&self, state: LocationState) -> LocationState {
        let mut inner = self.lock();
        inner.state = state;
        if let LocationState::Resolved(c) = state {
            inner.last_known = Some(c);
        }
        state
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    /// Replays a fixed platform outcome and counts calls.
    struct ScriptedSource {
        outcome: Result<PositionFix, PlatformError>,
        calls: Arc<AtomicU32>,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(outcome: Result<PositionFix, PlatformError>) -> Self {
            Self {
                outcome,
                calls: Arc::new(AtomicU32::new(0)),
                delay: Duration::ZERO,
            }
        }
    }

    impl LocationSource for ScriptedSource {
        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<PositionFix, PlatformError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.outcome
        }
    }

    fn default_coord() -> Coordinate {
        Coordinate::new(39.0473, -95.6752).unwrap()
    }

    fn fix(latitude: f64, longitude: f64) -> Result<PositionFix, PlatformError> {
        Ok(PositionFix {
            latitude,
            longitude,
        })
    }

    #[tokio::test]
    async fn valid_coordinates_round_trip_unchanged() {
        for (lat, lng) in [(0.0, 0.0), (90.0, 180.0), (-90.0, -180.0), (51.5072, -0.1276)] {
            let provider = LocationProvider::new(ScriptedSource::new(fix(lat, lng)), default_coord());
            let state = provider.acquire().await;
            assert_eq!(state, LocationState::Resolved(Coordinate::new(lat, lng).unwrap()));
        }
    }

    #[tokio::test]
    async fn out_of_range_fix_is_clamped() {
        let provider = LocationProvider::new(ScriptedSource::new(fix(91.0, 181.0)), default_coord());
        let state = provider.acquire().await;
        assert_eq!(state, LocationState::Resolved(Coordinate::new(90.0, 180.0).unwrap()));
    }

    #[tokio::test]
    async fn non_finite_fix_is_unavailable() {
        let provider =
            LocationProvider::new(ScriptedSource::new(fix(f64::NAN, 0.0)), default_coord());
        assert_eq!(
            provider.acquire().await,
            LocationState::Failed(LocationError::Unavailable)
        );
    }

    #[tokio::test]
    async fn platform_codes_map_to_failures() {
        let cases = [
            (PlatformError::Unsupported, LocationError::Unsupported),
            (PlatformError::Code(1), LocationError::PermissionDenied),
            (PlatformError::Code(2), LocationError::Unavailable),
            (PlatformError::Code(3), LocationError::Timeout),
            (PlatformError::Code(99), LocationError::Unknown),
        ];
        for (platform, expected) in cases {
            let provider = LocationProvider::new(ScriptedSource::new(Err(platform)), default_coord());
            assert_eq!(provider.acquire().await, LocationState::Failed(expected));
            assert_eq!(provider.state(), LocationState::Failed(expected));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_platform_times_out_after_ten_seconds() {
        let mut source = ScriptedSource::new(fix(1.0, 1.0));
        source.delay = Duration::from_secs(30);
        let provider = LocationProvider::new(source, default_coord());

        let start = Instant::now();
        let state = provider.acquire().await;

        assert_eq!(state, LocationState::Failed(LocationError::Timeout));
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_fix_is_reused_without_platform_call() {
        let source = ScriptedSource::new(fix(10.0, 20.0));
        let calls = Arc::clone(&source.calls);
        let provider = LocationProvider::new(source, default_coord());

        provider.acquire().await;
        tokio::time::advance(Duration::from_secs(299)).await;
        provider.acquire().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_fix_triggers_fresh_read() {
        let source = ScriptedSource::new(fix(10.0, 20.0));
        let calls = Arc::clone(&source.calls);
        let provider = LocationProvider::new(source, default_coord());

        provider.acquire().await;
        tokio::time::advance(Duration::from_secs(301)).await;
        provider.acquire().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_after_failure_asks_platform_again() {
        let source = ScriptedSource::new(Err(PlatformError::Code(1)));
        let calls = Arc::clone(&source.calls);
        let provider = LocationProvider::new(source, default_coord());

        provider.acquire().await;
        provider.acquire().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn effective_coordinate_falls_back_to_default() {
        let provider =
            LocationProvider::new(ScriptedSource::new(Err(PlatformError::Code(1))), default_coord());
        assert_eq!(provider.state(), LocationState::Unresolved);
        provider.acquire().await;
        assert_eq!(provider.effective_coordinate(), default_coord());
    }

    #[tokio::test]
    async fn effective_coordinate_prefers_last_known_over_default() {
        let last = Coordinate::new(40.0, -74.0).unwrap();
        let provider =
            LocationProvider::new(ScriptedSource::new(Err(PlatformError::Unsupported)), default_coord())
                .with_last_known(Some(last));
        provider.acquire().await;
        assert_eq!(provider.effective_coordinate(), last);
    }

    #[tokio::test]
    async fn effective_coordinate_uses_resolved_fix() {
        let provider = LocationProvider::new(ScriptedSource::new(fix(12.0, 34.0)), default_coord())
            .with_last_known(Coordinate::new(40.0, -74.0).ok());
        provider.acquire().await;
        assert_eq!(
            provider.effective_coordinate(),
            Coordinate::new(12.0, 34.0).unwrap()
        );
    }

    #[test]
    fn default_options_match_platform_contract() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, Duration::from_millis(10_000));
        assert_eq!(options.maximum_age, Duration::from_millis(300_000));
    }
}
