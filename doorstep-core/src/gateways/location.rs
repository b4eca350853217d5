use crate::entities::Coordinate;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

pub const DEFAULT_POSITION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location services are not supported on this device")]
    Unsupported,
    #[error("Permission to access the location was denied")]
    PermissionDenied,
    #[error("The current position is unavailable")]
    PositionUnavailable,
    #[error("Timed out while waiting for the current position")]
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Upper bound for waiting on the sensor.
    pub timeout: Duration,
    /// A hint only, sensors may deliver a coarser fix.
    pub high_accuracy: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_POSITION_TIMEOUT,
            high_accuracy: true,
        }
    }
}

pub type PositionReply = oneshot::Sender<Result<Coordinate, LocationError>>;

/// A device location sensor.
///
/// The sensor answers exactly once through `reply`, either
/// with a position or with one of the failure kinds.
/// Dropping `reply` without answering is treated as
/// [`LocationError::PositionUnavailable`].
pub trait LocationSensor: Send + Sync {
    fn request_position(&self, options: &PositionOptions, reply: PositionReply);
}
