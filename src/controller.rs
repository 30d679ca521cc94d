//! Toggle controller
//!
//! Polls the button at a fixed cadence and, on each rising edge, asks the
//! server what it is doing and issues the opposite. The server is the source
//! of truth for "playing", so sequences that end on their own or are started
//! by another client never desynchronise the button.

use std::fmt;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::input::{ButtonInput, EdgeDetector, InputError};
use crate::remote::{ShowRemote, StatusEntry};

pub const POLL_PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    Play,
    Stop,
}

impl PressAction {
    /// Stop if the first entry reports playing; play in every other case,
    /// including an empty listing or a missing `State`.
    pub fn for_status(entries: &[StatusEntry]) -> Self {
        match entries.first() {
            Some(entry) if entry.is_playing() => PressAction::Stop,
            _ => PressAction::Play,
        }
    }
}

impl fmt::Display for PressAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PressAction::Play => f.write_str("play"),
            PressAction::Stop => f.write_str("stop"),
        }
    }
}

pub struct ToggleController<R: ShowRemote> {
    remote: R,
    detector: EdgeDetector,
    period: Duration,
}

impl<R: ShowRemote> ToggleController<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            detector: EdgeDetector::new(),
            period: POLL_PERIOD,
        }
    }

    /// Override the tick period (tests, slow boards)
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Handle one press. Returns the action issued, or `None` when the
    /// status query failed and the press was dropped.
    pub async fn on_press(&self) -> Option<PressAction> {
        let entries = match self.remote.status().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Could not get status, ignoring press");
                return None;
            }
        };

        let action = PressAction::for_status(&entries);
        info!(%action, "Button pressed");

        let result = match action {
            PressAction::Play => self.remote.play().await,
            PressAction::Stop => self.remote.stop().await,
        };
        match result {
            Ok(reply) => debug!(%action, ?reply, "Vixen accepted request"),
            Err(e) => warn!(error = %e, "Could not {} sequence", action),
        }

        Some(action)
    }

    /// Run the poll loop until `shutdown` is cancelled.
    ///
    /// Each tick samples the input, handles a rising edge, then checks the
    /// token before sleeping, so an edge seen in the tick that observes
    /// shutdown is still handled. `input` is consumed and dropped on every
    /// exit path, releasing the pin exactly once.
    pub async fn run<I: ButtonInput>(
        &mut self,
        mut input: I,
        shutdown: CancellationToken,
    ) -> Result<(), InputError> {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.reset();

        info!(period_ms = self.period.as_millis() as u64, "Control loop started");

        loop {
            let level = input.is_pressed()?;
            if self.detector.update(level) {
                self.on_press().await;
            }

            if shutdown.is_cancelled() {
                break;
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }
        }

        info!("Control loop stopped");
        Ok(())
    }
}
