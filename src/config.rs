//! Service Configuration
//!
//! Settings come from environment variables first; command-line flags
//! (`--bind`, `--upload-dir`) override them.
//!
//! | Variable           | Default      |
//! |--------------------|--------------|
//! | `HOST`             | `0.0.0.0`    |
//! | `PORT`             | `5000`       |
//! | `UPLOAD_DIR`       | `./uploads`  |
//! | `ENVIRONMENT`      | `production` |
//! | `SEED_EXAMPLES`    | `true`       |
//! | `MAX_UPLOAD_BYTES` | `10000000`   |

use crate::files::protocol::DEFAULT_MAX_UPLOAD_BYTES;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Anything other than `development` (any case) is treated as production.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub environment: Environment,
    /// Create the two example items at startup.
    pub seed_examples: bool,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            environment: Environment::Production,
            seed_examples: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Missing value for argument {0}")]
    MissingArgument(String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip = parse_setting::<IpAddr>("HOST", &host)?;
        let port = match lookup("PORT") {
            Some(port) => parse_setting::<u16>("PORT", &port)?,
            None => DEFAULT_PORT,
        };
        config.bind_addr = SocketAddr::new(ip, port);

        if let Some(dir) = lookup("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(environment) = lookup("ENVIRONMENT") {
            config.environment = Environment::parse(&environment);
        }
        if let Some(seed) = lookup("SEED_EXAMPLES") {
            config.seed_examples = parse_setting("SEED_EXAMPLES", &seed.to_lowercase())?;
        }
        if let Some(max) = lookup("MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = parse_setting("MAX_UPLOAD_BYTES", &max)?;
        }

        Ok(config)
    }

    /// Applies command-line flags on top of the current settings. Unknown
    /// arguments are skipped.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self, ConfigError> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = flag_value(args, i)?;
                    self.bind_addr = parse_setting("--bind", value)?;
                    i += 2;
                }
                "--upload-dir" => {
                    let value = flag_value(args, i)?;
                    self.upload_dir = PathBuf::from(value);
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }
        Ok(self)
    }
}

fn flag_value(args: &[String], i: usize) -> Result<&str, ConfigError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingArgument(args[i].clone()))
}

fn parse_setting<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
