//! Vixen Control
//!
//! Push-button play/stop toggle for a Vixen show-control server.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vixen_control::cli::{self, Mode};
use vixen_control::config;
use vixen_control::remote::RemoteClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vixen_control=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::load_settings()?;
    tracing::debug!(?settings, "Configuration loaded");

    let remote = RemoteClient::new(&settings)?;

    match Mode::from_args(std::env::args()) {
        Mode::Query(query) => {
            let mut stdout = std::io::stdout().lock();
            cli::print_query(&remote, query, &mut stdout).await?;
        }
        Mode::Run => run_loop(remote, &settings).await?,
    }

    Ok(())
}

/// Watch the button until SIGINT/SIGTERM. The pin is released when the
/// controller returns, whichever way it returns.
#[cfg(feature = "gpio")]
async fn run_loop(remote: RemoteClient, settings: &config::Settings) -> Result<()> {
    use anyhow::Context;
    use tokio_util::sync::CancellationToken;
    use vixen_control::controller::ToggleController;
    use vixen_control::input::GpioButton;
    use vixen_control::shutdown::SignalTrap;

    let trap = SignalTrap::install(CancellationToken::new())
        .context("failed to install signal handlers")?;
    let button = GpioButton::open(settings.button_pin)
        .with_context(|| format!("failed to open button on GPIO {}", settings.button_pin))?;

    tracing::info!(
        host = remote.base_url(),
        sequence = %settings.sequence_name,
        "Press CTRL+C to stop"
    );

    let mut controller = ToggleController::new(remote);
    controller.run(button, trap.token()).await?;
    Ok(())
}

#[cfg(not(feature = "gpio"))]
async fn run_loop(_remote: RemoteClient, _settings: &config::Settings) -> Result<()> {
    anyhow::bail!("built without the `gpio` feature; only `seq` and `status` are available")
}
