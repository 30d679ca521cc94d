//! Signal-driven shutdown
//!
//! SIGINT and SIGTERM cancel a shared [`CancellationToken`] instead of killing
//! the process. The control loop observes the token once per tick.

use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct SignalTrap {
    token: CancellationToken,
}

impl SignalTrap {
    /// Register the handlers and start listening. Must be called from inside
    /// a tokio runtime, before the control loop starts.
    ///
    /// Handlers stay installed for the rest of the process; repeated signals
    /// only re-cancel an already cancelled token.
    pub fn install(token: CancellationToken) -> std::io::Result<Self> {
        Self::listen(token.clone())?;
        Ok(Self { token })
    }

    #[cfg(unix)]
    fn listen(token: CancellationToken) -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        // Registered here, not in the task, so no signal slips through before
        // the task is first polled
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::spawn(async move {
            loop {
                let name = tokio::select! {
                    received = sigint.recv() => match received {
                        Some(()) => "SIGINT",
                        None => break,
                    },
                    received = sigterm.recv() => match received {
                        Some(()) => "SIGTERM",
                        None => break,
                    },
                };
                info!(signal = name, "Shutdown signal received");
                token.cancel();
            }
        });
        Ok(())
    }

    #[cfg(not(unix))]
    fn listen(token: CancellationToken) -> std::io::Result<()> {
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                token.cancel();
            }
        });
        Ok(())
    }

    /// Non-blocking read of the shutdown flag
    pub fn is_set(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
