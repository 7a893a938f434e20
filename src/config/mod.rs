mod file_config;

pub use file_config::{DatabasesConfig, FileConfig};

use crate::album_store::DEFAULT_READ_POOL_SIZE;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Which database the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AppMode {
    #[default]
    Production,
    Development,
    Testing,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub mode: AppMode,
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub read_pool_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        let server = ServerConfig::default();
        Self {
            db_dir: None,
            mode: AppMode::default(),
            host: server.host,
            port: server.port,
            logging_level: server.requests_logging_level,
            read_pool_size: DEFAULT_READ_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub mode: AppMode,
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub read_pool_size: usize,
    pub databases: DatabaseNames,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseNames {
    pub production: String,
    pub development: String,
    pub testing: String,
}

impl Default for DatabaseNames {
    fn default() -> Self {
        Self {
            production: "albums.db".to_string(),
            development: "albums_dev.db".to_string(),
            testing: "albums_test.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| anyhow!("db_dir must be specified via --db-dir or in config file"))?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let mode = match file.mode {
            Some(s) => parse_mode(&s).ok_or_else(|| anyhow!("Invalid mode in config file: {}", s))?,
            None => cli.mode,
        };

        let logging_level = match file.logging_level {
            Some(s) => parse_logging_level(&s)
                .ok_or_else(|| anyhow!("Invalid logging_level in config file: {}", s))?,
            None => cli.logging_level.clone(),
        };

        let defaults = DatabaseNames::default();
        let file_databases = file.databases.unwrap_or_default();
        let databases = DatabaseNames {
            production: file_databases.production.unwrap_or(defaults.production),
            development: file_databases.development.unwrap_or(defaults.development),
            testing: file_databases.testing.unwrap_or(defaults.testing),
        };

        Ok(Self {
            db_dir,
            mode,
            host: file.host.unwrap_or_else(|| cli.host.clone()),
            port: file.port.unwrap_or(cli.port),
            logging_level,
            read_pool_size: file.read_pool_size.unwrap_or(cli.read_pool_size),
            databases,
        })
    }

    /// Database file for the configured mode.
    pub fn album_db_path(&self) -> PathBuf {
        let name = match self.mode {
            AppMode::Production => &self.databases.production,
            AppMode::Development => &self.databases.development,
            AppMode::Testing => &self.databases.testing,
        };
        self.db_dir.join(name)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

fn parse_mode(s: &str) -> Option<AppMode> {
    AppMode::from_str(s, true).ok()
}
