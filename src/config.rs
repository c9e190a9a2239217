use crate::presence::{WatchdogConfig, DEFAULT_TIMEOUT_MESSAGE};
use anyhow::{ensure, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment prefix for dashboard settings (e.g. `MEETDASHBOARD_ZOOM_URL`)
pub const ENV_PREFIX: &str = "MEETDASHBOARD";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Meeting link rendered on the available page
    pub zoom_url: String,
    pub bind: String,
    pub port: u16,
    /// Directory holding the page templates and `/dashboard/*` assets
    pub static_dir: PathBuf,
    pub watchdog_interval_secs: u64,
    pub watchdog_threshold: u32,
    pub timeout_message: String,
}

impl Config {
    /// Load from defaults, an optional config file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Same as [`Config::load`] but reading variables from `env`.
    ///
    /// `PORT` is honoured unprefixed and takes precedence over `MEETDASHBOARD_PORT`.
    pub fn load_with_env(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("zoom_url", "")?
            .set_default("bind", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("static_dir", "static")?
            .set_default("watchdog_interval_secs", 10)?
            .set_default("watchdog_threshold", 3)?
            .set_default("timeout_message", DEFAULT_TIMEOUT_MESSAGE)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let port = env.get("PORT").filter(|p| !p.is_empty()).cloned();

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(Some(env)),
        );

        if let Some(port) = port {
            builder = builder.set_override("port", port)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.zoom_url.trim().is_empty(),
            "you must supply the environment variable {}_ZOOM_URL",
            ENV_PREFIX
        );
        self.watchdog().validate()
    }

    pub fn watchdog(&self) -> WatchdogConfig {
        WatchdogConfig {
            interval: Duration::from_secs(self.watchdog_interval_secs),
            threshold: self.watchdog_threshold,
            timeout_message: self.timeout_message.clone(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind, self.port).parse()?;
        Ok(addr)
    }
}
