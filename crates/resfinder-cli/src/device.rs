//! Terminal stand-ins for the device capabilities.

use resfinder_finder::{DialError, Dialer, LocationSource, PlatformError, PositionFix, PositionOptions};

/// Position supplied on the command line. Without one the terminal behaves
/// like a device with no geolocation support.
#[derive(Debug, Clone, Copy)]
pub struct FlagLocation(Option<PositionFix>);

impl FlagLocation {
    pub fn from_args(lat: Option<f64>, lng: Option<f64>) -> Self {
        Self(lat.zip(lng).map(|(latitude, longitude)| PositionFix {
            latitude,
            longitude,
        }))
    }
}

impl LocationSource for FlagLocation {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<PositionFix, PlatformError> {
        self.0.ok_or(PlatformError::Unsupported)
    }
}

/// Prints the `tel:` URI for the user to hand to their phone.
pub struct ConsoleDialer;

impl Dialer for ConsoleDialer {
    fn dial(&self, uri: &str) -> Result<(), DialError> {
        println!("Dialing {uri}");
        Ok(())
    }
}
