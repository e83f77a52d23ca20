//! Service configuration.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from cadence.toml)
//! - User overrides (~/.config/cadence/cadence.toml, then ./cadence.toml)
//! - Environment variables (`CADENCE_WORKER__PACING_DELAY_MS=5000`)
//!
//! Everything is read once at startup; nothing here changes at runtime.

use crate::BackoffPolicy;
use cadence_core::PromptBudget;
use cadence_error::{CadenceResult, ConfigError};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../cadence.toml");

/// Upstream generation API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API key; `None` defers to the `GEMINI_API_KEY` environment variable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier, with or without a `models/` prefix
    pub model: String,
    /// Base URL the model name and `:generateContent` are appended to
    pub base_url: String,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models/".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl GeminiSettings {
    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Serialized worker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Pause after every task, success or failure
    pub pacing_delay_ms: u64,
    /// Upstream calls per task before giving up on rate limits
    pub max_attempts: u32,
    /// Backoff when a rate-limit message carries no retry hint
    pub default_backoff_ms: u64,
    /// Added to the upstream's retry hint
    pub backoff_buffer_ms: u64,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            pacing_delay_ms: 10_000,
            max_attempts: 5,
            default_backoff_ms: 30_000,
            backoff_buffer_ms: 1_000,
        }
    }
}

impl WorkerSettings {
    /// Pause after every task.
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    /// Backoff policy built from the two backoff fields.
    pub fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy {
            default_delay_ms: self.default_backoff_ms,
            buffer_ms: self.backoff_buffer_ms,
        }
    }
}

/// Admission gate capacities, one per gated entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct GateSettings {
    /// Question generation entry point
    pub generation: usize,
    /// Code analysis entry point
    pub analysis: usize,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            generation: 10,
            analysis: 5,
        }
    }
}

/// HTTP surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on
    pub bind: String,
    /// How long a caller waits for its task before giving up
    pub wait_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            wait_timeout_secs: 60,
        }
    }
}

impl ServerSettings {
    /// Bounded wait for a caller's result.
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level Cadence configuration.
///
/// # Example
///
/// ```no_run
/// use cadence_rate_limit::CadenceConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CadenceConfig::load()?;
/// println!("pacing: {:?}", config.worker.pacing_delay());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct CadenceConfig {
    /// Upstream API
    #[serde(default)]
    pub gemini: GeminiSettings,
    /// Serialized worker
    #[serde(default)]
    pub worker: WorkerSettings,
    /// Admission gates
    #[serde(default)]
    pub gates: GateSettings,
    /// HTTP surface
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Prompt character budgets
    #[serde(default)]
    pub prompt: PromptBudget,
}

impl CadenceConfig {
    /// Load configuration from a specific file path, with no other layers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CadenceResult<Self> {
        debug!("Loading configuration from file");
        let origin = path.as_ref().display().to_string();
        let builder = Config::builder().add_source(File::from(path.as_ref()));
        Self::finish(builder, &origin)
    }

    /// Load configuration with precedence: env > ./cadence.toml > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped if missing.
    #[instrument]
    pub fn load() -> CadenceResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::bundled();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/cadence/cadence.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("cadence").required(false))
            .add_source(Self::environment());

        Self::finish(builder, "layered sources")
    }

    /// Load bundled defaults overridden by one explicit file, then the environment.
    ///
    /// Used by the CLI's `--config` flag; the file is required.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_with_override(path: impl AsRef<Path>) -> CadenceResult<Self> {
        let origin = path.as_ref().display().to_string();
        let builder = Self::bundled()
            .add_source(File::from(path.as_ref()))
            .add_source(Self::environment());
        Self::finish(builder, &origin)
    }

    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Gate capacities and the attempt budget must be at least one.
    pub fn validate(&self) -> CadenceResult<()> {
        if self.gates.generation == 0 || self.gates.analysis == 0 {
            return Err(ConfigError::new(format!(
                "Gate capacities must be positive (generation = {}, analysis = {})",
                self.gates.generation, self.gates.analysis
            ))
            .into());
        }
        if self.worker.max_attempts == 0 {
            return Err(ConfigError::new("worker.max_attempts must be at least 1").into());
        }
        Ok(())
    }

    fn bundled() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn environment() -> Environment {
        Environment::with_prefix("CADENCE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(builder: ConfigBuilder<DefaultState>, origin: &str) -> CadenceResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ConfigError::new(format!("Failed to build configuration: {}", e))
                    .with_origin(origin)
            })?
            .try_deserialize()
            .map_err(|e| {
                ConfigError::new(format!("Failed to parse configuration: {}", e))
                    .with_origin(origin)
            })?;

        config.validate()?;
        debug!(
            model = %config.gemini.model,
            pacing_delay_ms = config.worker.pacing_delay_ms,
            "Configuration loaded"
        );
        Ok(config)
    }
}
