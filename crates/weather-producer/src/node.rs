use std::fmt;
use std::time::Duration;
use tokio::sync::watch;

use crate::api::ReadingSource;
use crate::error::Result;
use crate::publisher::QueuePublisher;
use crate::reading::WeatherReading;

/// Where the node is within its fetch/publish cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Between cycles, sleeping or not yet started.
    Idle,
    /// A fetch or publish is outstanding.
    InFlight,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleState::Idle => write!(f, "idle"),
            CycleState::InFlight => write!(f, "in-flight"),
        }
    }
}

/// Periodic publisher: fetch a reading, publish it, sleep, repeat.
///
/// The sleep starts after the publish completes, so the period drifts by the
/// duration of each cycle. The node owns its publisher and closes it on
/// every exit path of [`ProducerNode::run`].
pub struct ProducerNode<S, P> {
    source: S,
    publisher: P,
    interval: Duration,
    state: CycleState,
    cycles: u64,
}

impl<S: ReadingSource, P: QueuePublisher> ProducerNode<S, P> {
    pub fn new(source: S, publisher: P, interval: Duration) -> Self {
        Self {
            source,
            publisher,
            interval,
            state: CycleState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Number of completed fetch/publish cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run a single fetch -> publish cycle.
    pub async fn run_cycle(&mut self) -> Result<WeatherReading> {
        self.transition(CycleState::InFlight);
        let result = self.fetch_and_publish().await;
        self.transition(CycleState::Idle);

        let reading = result?;
        self.cycles += 1;
        log::info!(
            "Sent weather data to queue ({} bytes, cycle {})",
            reading.as_bytes().len(),
            self.cycles
        );
        Ok(reading)
    }

    /// Loop until shutdown or the first fetch/publish error, then close the publisher.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<()>) -> Result<()> {
        log::info!("Producer started, publishing every {:?}", self.interval);

        let outcome = self.drive(&mut shutdown_rx).await;

        if let Err(e) = self.publisher.close().await {
            log::warn!("Failed to close publisher: {}", e);
        }
        log::info!("Producer stopped after {} cycles", self.cycles);
        outcome
    }

    async fn drive(&mut self, shutdown_rx: &mut watch::Receiver<()>) -> Result<()> {
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    log::info!("Shutdown requested during {} cycle", self.state);
                    self.transition(CycleState::Idle);
                    return Ok(());
                }
                result = self.run_cycle() => {
                    result?;
                }
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    log::info!("Shutdown requested while idle");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    async fn fetch_and_publish(&self) -> Result<WeatherReading> {
        let reading = self.source.fetch_reading().await?;
        self.publisher.publish(&reading).await?;
        Ok(reading)
    }

    fn transition(&mut self, next: CycleState) {
        if self.state != next {
            log::debug!("{} -> {}", self.state, next);
            self.state = next;
        }
    }
}
