//! Handles settings for the application. Configuration is read from
//! `settings.toml` (or the file given with `--config`) and can be overridden
//! with `INVOICE__<SECTION>__<KEY>` environment variables.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Minutes after which an untouched form session is dropped.
    pub session_idle_minutes: u32,
    /// Upper bound on concurrently stored form sessions.
    pub max_sessions: usize,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 42069,
            session_idle_minutes: 60,
            max_sessions: 10_000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "invoice", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("INVOICE").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        settings.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.server.session_idle_minutes == 0 {
            return Err(ConfigError::Message(
                "server.session_idle_minutes must be at least 1".to_string(),
            ));
        }
        if self.server.max_sessions == 0 {
            return Err(ConfigError::Message(
                "server.max_sessions must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}
