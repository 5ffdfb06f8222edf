//! NNTP server configuration

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use thiserror::Error;
use tracing::warn;

/// Default server domain used in the banner and message-ids
pub const DEFAULT_DOMAIN: &str = "news.nntpub.example.com";

/// Upper bound on `random.articles`
pub const MAX_RANDOM_ARTICLES: usize = 100_000;

/// Default description for generated groups
const INTERNAL_GROUP_DESCRIPTION: &str = "News server internal group";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Line could not be parsed
    #[error("syntax error on line {line}: {message}")]
    SyntaxError {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// Value could not be converted to the option's type
    #[error("invalid value for {option}: {value}")]
    InvalidValue {
        /// Fully qualified option name (e.g. `nntp.port`)
        option: String,
        /// Raw value from the file
        value: String,
    },

    /// No source is registered under this name
    #[error("unknown news source: {0}")]
    UnknownSource(String),

    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// NNTP server configuration
///
/// Only `domain` reaches the protocol engine; the rest decides where the
/// listener binds and which news source backs it.
///
/// # Example
///
/// ```
/// use nntpub::ServerConfig;
///
/// let config = ServerConfig::parse("[nntp]\nport = 60119\ndomain = news.example.com\n").unwrap();
/// assert_eq!(config.port, 60119);
/// assert_eq!(config.domain, "news.example.com");
/// assert_eq!(config.source, "random");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    /// Address to listen on
    pub listen: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Domain announced in the banner and used for message-ids
    pub domain: String,

    /// Name of the news source implementation (`random` or `memory`)
    pub source: String,

    /// Settings for the `random` source
    #[cfg_attr(feature = "serde", serde(default))]
    pub random: RandomConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 119,
            domain: DEFAULT_DOMAIN.to_string(),
            source: "random".to_string(),
            random: RandomConfig::default(),
        }
    }
}

/// Settings for the synthetic `random` source
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomConfig {
    /// Groups to generate as (name, description), in catalog order
    pub groups: Vec<(String, String)>,

    /// Number of articles per group, at most [`MAX_RANDOM_ARTICLES`]
    pub articles: usize,

    /// Fixed RNG seed for a reproducible catalog
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            groups: vec![
                ("control".to_string(), INTERNAL_GROUP_DESCRIPTION.to_string()),
                ("junk".to_string(), INTERNAL_GROUP_DESCRIPTION.to_string()),
            ],
            articles: 2,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from an ini file
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config file not found; using defaults");
                Self::parse("")
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Parse configuration from ini text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw = parse_ini(content)?;
        let mut config = Self::default();

        match raw.get("nntp.listen") {
            Some(value) => config.listen = parse_value("nntp.listen", value)?,
            None => warn!(listen = %config.listen, "no listen address specified"),
        }
        match raw.get("nntp.port") {
            Some(value) => config.port = parse_value("nntp.port", value)?,
            None => warn!(port = config.port, "no listen port specified"),
        }
        if let Some(value) = raw.get("nntp.domain") {
            config.domain = value.clone();
        }
        if let Some(value) = raw.get("nntp.source") {
            config.source = value.clone();
        }

        if let Some(value) = raw.get("random.groups") {
            config.random.groups = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), INTERNAL_GROUP_DESCRIPTION.to_string()))
                .collect();
        }
        if let Some(value) = raw.get("random.articles") {
            let articles = parse_value("random.articles", value)?;
            if articles > MAX_RANDOM_ARTICLES {
                return Err(ConfigError::InvalidValue {
                    option: "random.articles".to_string(),
                    value: value.clone(),
                });
            }
            config.random.articles = articles;
        }
        if let Some(value) = raw.get("random.seed") {
            config.random.seed = Some(parse_value("random.seed", value)?);
        }

        for key in raw.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                warn!(option = %key, "ignoring unknown option");
            }
        }

        Ok(config)
    }
}

const KNOWN_KEYS: &[&str] = &[
    "nntp.listen",
    "nntp.port",
    "nntp.domain",
    "nntp.source",
    "random.groups",
    "random.articles",
    "random.seed",
];

fn parse_value<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    })
}

/// Flatten ini text into `section.key` => value
fn parse_ini(content: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut values = HashMap::new();
    let mut section = String::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.strip_suffix(']').ok_or(ConfigError::SyntaxError {
                line: line_num + 1,
                message: "unterminated section header".into(),
            })?;
            section = name.trim().to_lowercase();
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::SyntaxError {
            line: line_num + 1,
            message: "expected key = value".into(),
        })?;

        let key = key.trim().to_lowercase();
        let full_key = if section.is_empty() {
            key
        } else {
            format!("{section}.{key}")
        };
        values.insert(full_key, value.trim().to_string());
    }

    Ok(values)
}
