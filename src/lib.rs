#![doc = include_str!("../README.md")]

/// NNTP command parsing and wire rendering
pub mod commands;
mod config;
mod error;
mod response;
/// Per-connection session state
pub mod session;
/// Connection loop and TCP listener
pub mod server;
/// News sources backing the server
pub mod source;

pub use commands::{ArticleRange, Command, GroupInfo, parse_command, parse_range};
pub use config::{
    ConfigError, DEFAULT_DOMAIN, MAX_RANDOM_ARTICLES, RandomConfig, ServerConfig,
};
pub use error::{NntpError, Result};
pub use response::{BLOCK_TERMINATOR, CRLF, Reply, codes};
pub use server::{MAX_LINE_LENGTH, NntpServer, serve_connection};
pub use session::{Flow, Session};
pub use source::{
    Article, BODY_LINE_SEPARATOR, MemoryGroup, MemorySource, NewsGroup, NewsSource, RandomSource,
};
