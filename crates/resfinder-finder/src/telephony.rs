//! Handing phone numbers to whatever can place a call.

use thiserror::Error;

use crate::links::tel_uri;

#[derive(Debug, Error)]
#[error("dialer rejected {uri}: {reason}")]
pub struct DialError {
    pub uri: String,
    pub reason: String,
}

/// Opens a `tel:` URI on the host (phone app, softphone, system opener).
pub trait Dialer {
    /// # Errors
    ///
    /// Returns [`DialError`] when the host cannot open the URI.
    fn dial(&self, uri: &str) -> Result<(), DialError>;
}

/// Fire-and-forget call: the outcome is logged, never returned.
///
/// Returns the URI handed to the dialer, or `None` when `number` has no
/// digits and nothing was dialed.
pub fn call<D: Dialer + ?Sized>(dialer: &D, number: &str) -> Option<String> {
    let Some(uri) = tel_uri(number) else {
        tracing::warn!(number, "not a dialable number");
        return None;
    };
    match dialer.dial(&uri) {
        Ok(()) => tracing::info!(%uri, "call handed to dialer"),
        Err(e) => tracing::warn!(error = %e, "dialer failed"),
    }
    Some(uri)
}
