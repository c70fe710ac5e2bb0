use crate::infrastructure::{AppConfig, ConfigError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "loanterm",
    about = "Fill in a loan application and follow its simulated review in the terminal",
    version
)]
pub struct Cli {
    /// JSON config file; missing keys use defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Address shown in the embed snippet
    #[arg(long)]
    pub page_url: Option<String>,
    /// Milliseconds of real time per countdown second
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// Seed for a reproducible review outcome
    #[arg(long)]
    pub seed: Option<u64>,
    /// Append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log level or filter, e.g. "debug" or "loanterm=trace"
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Loads the config file if given, applies flag overrides and validates.
    pub fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(page_url) = &self.page_url {
            config.page_url = page_url.clone();
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
