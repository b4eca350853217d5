use doorstep_core::{
    entities::Coordinate,
    gateways::location::{LocationError, LocationSensor, PositionOptions, PositionReply},
};
use std::time::Duration;

/// A sensor that reports a preconfigured outcome.
///
/// Used on hosts without positioning hardware. The reply is
/// sent from a spawned task so callers never receive it
/// synchronously, which requires a running tokio runtime.
#[derive(Debug, Clone)]
pub struct StaticSensor {
    outcome: Result<Coordinate, LocationError>,
    delay: Option<Duration>,
}

impl StaticSensor {
    pub const fn fixed(coord: Coordinate) -> Self {
        Self {
            outcome: Ok(coord),
            delay: None,
        }
    }

    pub const fn failing(err: LocationError) -> Self {
        Self {
            outcome: Err(err),
            delay: None,
        }
    }

    /// Simulates the time needed for a position fix.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl LocationSensor for StaticSensor {
    fn request_position(&self, options: &PositionOptions, reply: PositionReply) {
        log::debug!("Static position requested (high accuracy = {})", options.high_accuracy);
        let outcome = self.outcome;
        let delay = self.delay;
        tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if reply.send(outcome).is_err() {
                log::debug!("Position request has been abandoned");
            }
        });
    }
}
