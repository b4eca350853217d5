use crate::{
    entities::Coordinate,
    gateways::location::{LocationError, LocationSensor, PositionOptions},
};
use std::sync::Arc;
use tokio::{sync::oneshot, time};
use tokio_util::sync::CancellationToken;

/// Wraps the device location sensor into a single awaited outcome.
pub struct CoordinateAcquirer {
    sensor: Option<Arc<dyn LocationSensor>>,
    options: PositionOptions,
}

impl CoordinateAcquirer {
    pub fn new(sensor: Option<Arc<dyn LocationSensor>>, options: PositionOptions) -> Self {
        Self { sensor, options }
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Requests the current position.
    ///
    /// Returns `None` if `cancel` fires before the sensor responds;
    /// a late response is dropped. The exclusive borrow prevents a
    /// second acquisition while one is outstanding.
    pub async fn acquire(
        &mut self,
        cancel: &CancellationToken,
    ) -> Option<Result<Coordinate, LocationError>> {
        let Some(sensor) = &self.sensor else {
            return Some(Err(LocationError::Unsupported));
        };
        if cancel.is_cancelled() {
            return None;
        }
        let (reply, response) = oneshot::channel();
        log::debug!(
            "Requesting position (timeout = {:?}, high accuracy = {})",
            self.options.timeout,
            self.options.high_accuracy
        );
        sensor.request_position(&self.options, reply);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("Position request abandoned");
                None
            }
            res = time::timeout(self.options.timeout, response) => {
                let res = match res {
                    Err(_) => Err(LocationError::Timeout),
                    Ok(Err(_)) => Err(LocationError::PositionUnavailable),
                    Ok(Ok(res)) => res.and_then(|coord| {
                        if coord.is_valid() {
                            Ok(coord)
                        } else {
                            Err(LocationError::PositionUnavailable)
                        }
                    }),
                };
                if let Err(err) = &res {
                    log::warn!("Unable to acquire position: {err}");
                }
                Some(res)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockSensor, *};
    use std::time::Duration;

    fn acquirer(sensor: MockSensor) -> CoordinateAcquirer {
        CoordinateAcquirer::new(Some(Arc::new(sensor)), PositionOptions::default())
    }

    #[tokio::test]
    async fn acquire_position() {
        let coord = Coordinate::try_new(28.6139, 77.209).unwrap();
        let mut acquirer = acquirer(MockSensor::responding(Ok(coord)));
        let res = acquirer.acquire(&CancellationToken::new()).await;
        assert_eq!(Some(Ok(coord)), res);
    }

    #[tokio::test]
    async fn unsupported_without_sensor() {
        let mut acquirer = CoordinateAcquirer::new(None, PositionOptions::default());
        let res = acquirer.acquire(&CancellationToken::new()).await;
        assert_eq!(Some(Err(LocationError::Unsupported)), res);
    }

    #[tokio::test]
    async fn sensor_failures_are_passed_through() {
        for err in [
            LocationError::PermissionDenied,
            LocationError::PositionUnavailable,
        ] {
            let mut acquirer = acquirer(MockSensor::responding(Err(err)));
            assert_eq!(
                Some(Err(err)),
                acquirer.acquire(&CancellationToken::new()).await
            );
        }
    }

    #[tokio::test]
    async fn dropped_reply_means_unavailable() {
        let mut acquirer = acquirer(MockSensor::dropping());
        let res = acquirer.acquire(&CancellationToken::new()).await;
        assert_eq!(Some(Err(LocationError::PositionUnavailable)), res);
    }

    #[tokio::test]
    async fn invalid_position_means_unavailable() {
        let coord = Coordinate {
            latitude: f64::NAN,
            longitude: 0.0,
        };
        let mut acquirer = acquirer(MockSensor::responding(Ok(coord)));
        let res = acquirer.acquire(&CancellationToken::new()).await;
        assert_eq!(Some(Err(LocationError::PositionUnavailable)), res);
    }

    #[tokio::test(start_paused = true)]
    async fn time_out_silent_sensor() {
        let sensor = MockSensor::silent();
        let mut acquirer = CoordinateAcquirer::new(
            Some(Arc::new(sensor.clone())),
            PositionOptions {
                timeout: Duration::from_secs(10),
                high_accuracy: false,
            },
        );
        let started = time::Instant::now();
        let res = acquirer.acquire(&CancellationToken::new()).await;
        assert_eq!(Some(Err(LocationError::Timeout)), res);
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert!(started.elapsed() < Duration::from_secs(11));
        assert_eq!(1, sensor.requests());
    }

    #[tokio::test(start_paused = true)]
    async fn abandon_pending_request() {
        let mut acquirer = acquirer(MockSensor::silent());
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });
        assert_eq!(None, acquirer.acquire(&cancel).await);
    }

    #[tokio::test]
    async fn do_not_ask_the_sensor_after_cancellation() {
        let coord = Coordinate::try_new(28.6139, 77.209).unwrap();
        let sensor = MockSensor::responding(Ok(coord));
        let mut acquirer = acquirer(sensor.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(None, acquirer.acquire(&cancel).await);
        assert_eq!(0, sensor.requests());
    }
}
