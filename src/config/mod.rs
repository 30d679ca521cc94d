//! Configuration management

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Location of the settings document on a stock Pi image
pub const DEFAULT_CONFIG_PATH: &str = "/boot/vixenControl.yaml";

/// Environment variable that replaces [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_ENV: &str = "VIXEN_CONFIG_PATH";

/// Prefix for per-key overrides (VIXEN_CONTROL_REMOTE_HOST, ...)
const ENV_PREFIX: &str = "VIXEN_CONTROL";

/// Startup settings. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Base URI of the show-control server, e.g. `http://10.0.0.5:8888`
    #[serde(alias = "host")]
    pub remote_host: String,

    /// BCM number of the button input
    #[serde(alias = "buttonpin", alias = "buttonPin")]
    pub button_pin: u8,

    #[serde(alias = "seq")]
    pub sequence_name: String,

    /// Sequence file path as the server knows it
    #[serde(alias = "seqpath", alias = "seqPath")]
    pub sequence_file: String,
}

impl Settings {
    fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.remote_host)
            .with_context(|| format!("remote_host {:?} is not a valid URL", self.remote_host))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("remote_host must use http or https, got {:?}", url.scheme());
        }
        if self.sequence_name.trim().is_empty() {
            bail!("sequence_name must not be empty");
        }
        if self.sequence_file.trim().is_empty() {
            bail!("sequence_file must not be empty");
        }
        Ok(())
    }
}

/// Path of the settings document, honouring [`CONFIG_PATH_ENV`]
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub fn load_settings() -> Result<Settings> {
    load_settings_from(&config_path())
}

/// Load and validate settings from a YAML document. Every key is required;
/// unknown keys are rejected.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let source = ::config::Config::builder()
        .add_source(
            ::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Yaml)
                .required(true),
        )
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("failed to read settings from {}", path.display()))?;

    let settings: Settings = source
        .try_deserialize()
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    settings.validate()?;

    Ok(settings)
}
