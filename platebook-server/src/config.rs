//! Command line and environment configuration

use clap::{value_parser, Arg, ArgMatches, Command};
use platebook_core::auth::SigningKey;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable holding the token signing secret
pub const SECRET_ENV: &str = "SECRET_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing value for --{0}")]
    Missing(&'static str),

    #[error("unknown {0}: {1}")]
    Unknown(&'static str, String),

    #[error("invalid signing secret: {0}")]
    Secret(#[from] platebook_core::PlatebookError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Fjall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
    secret: Option<String>,
}

pub fn command() -> Command {
    Command::new("platebook-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recipe catalog REST API")
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help("Bind address")
                .env("PLATEBOOK_BIND")
                .default_value("127.0.0.1:5000")
                .value_parser(value_parser!(SocketAddr)),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .value_name("KIND")
                .help("Storage backend")
                .env("PLATEBOOK_BACKEND")
                .default_value("memory")
                .value_parser(["memory", "fjall"]),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("PATH")
                .help("Data directory path (fjall backend)")
                .env("PLATEBOOK_DATA_DIR")
                .default_value("./data")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("Log output format")
                .env("PLATEBOOK_LOG_FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
}

impl ServerConfig {
    /// Parse the process arguments and environment
    pub fn load() -> Result<Self, ConfigError> {
        let matches = command().get_matches();
        Self::from_matches(&matches, std::env::var(SECRET_ENV).ok())
    }

    pub fn from_matches(matches: &ArgMatches, secret: Option<String>) -> Result<Self, ConfigError> {
        let bind = *matches
            .get_one::<SocketAddr>("bind")
            .ok_or(ConfigError::Missing("bind"))?;

        let backend = match matches.get_one::<String>("backend").map(String::as_str) {
            Some("memory") => Backend::Memory,
            Some("fjall") => Backend::Fjall,
            Some(other) => return Err(ConfigError::Unknown("backend", other.to_string())),
            None => return Err(ConfigError::Missing("backend")),
        };

        let data_dir = matches
            .get_one::<PathBuf>("data-dir")
            .cloned()
            .ok_or(ConfigError::Missing("data-dir"))?;

        let log_format = match matches.get_one::<String>("log-format").map(String::as_str) {
            Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(ConfigError::Unknown("log format", other.to_string())),
            None => return Err(ConfigError::Missing("log-format")),
        };

        Ok(ServerConfig {
            bind,
            backend,
            data_dir,
            log_format,
            secret,
        })
    }

    /// Build the token signing key
    ///
    /// Without a configured secret a random one is generated, so tokens do
    /// not survive a restart.
    pub fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        match &self.secret {
            Some(secret) => Ok(SigningKey::new(secret.as_bytes())?),
            None => {
                let (key, _) = SigningKey::generate()?;
                warn!(
                    "{} is not set; using a generated secret, tokens will not survive a restart",
                    SECRET_ENV
                );
                Ok(key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], secret: Option<&str>) -> ServerConfig {
        let mut argv = vec!["platebook-server"];
        argv.extend_from_slice(args);
        let matches = command().try_get_matches_from(argv).unwrap();
        ServerConfig::from_matches(&matches, secret.map(str::to_string)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[], None);
        assert_eq!(config.bind, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_flags() {
        let config = parse(
            &[
                "--bind",
                "0.0.0.0:8080",
                "--backend",
                "fjall",
                "--data-dir",
                "/tmp/pb",
                "--log-format",
                "json",
            ],
            Some("s3cret"),
        );
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.backend, Backend::Fjall);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pb"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.signing_key().is_ok());
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let result = command().try_get_matches_from(["platebook-server", "--backend", "sqlite"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_bind() {
        let result = command().try_get_matches_from(["platebook-server", "--bind", "localhost"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_secret_handling() {
        assert!(parse(&[], None).signing_key().is_ok());
        assert!(matches!(
            parse(&[], Some("")).signing_key(),
            Err(ConfigError::Secret(_))
        ));
    }
}
