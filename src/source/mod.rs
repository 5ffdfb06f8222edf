//! News sources: the read-only article catalog a server presents
//!
//! A [`NewsSource`] owns an ordered set of [`NewsGroup`]s and each group owns
//! its [`Article`]s. Groups address articles by their group-local number, so
//! there are no references between articles or back to the owning group.

mod memory;
mod random;

pub use memory::{MemoryGroup, MemorySource};
pub use random::RandomSource;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{ConfigError, ServerConfig};

/// Separator between the lines of an article body
pub const BODY_LINE_SEPARATOR: &str = "\r\n";

/// A single stored article
///
/// Articles are immutable once created and belong to exactly one group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Article {
    /// Group-local article number
    pub id: u64,
    /// Subject line (no embedded line breaks)
    pub subject: String,
    /// Free-form sender, used for the From header
    pub sender: String,
    /// Body text, lines separated by [`BODY_LINE_SEPARATOR`]
    pub body: String,
    /// Creation time, used for the Date header
    pub created: DateTime<Utc>,
}

impl Article {
    /// Create an article stamped with the current time
    pub fn new(
        id: u64,
        subject: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::with_date(id, subject, sender, body, Utc::now())
    }

    /// Create an article with an explicit creation time
    pub fn with_date(
        id: u64,
        subject: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            sender: sender.into(),
            body: body.into(),
            created,
        }
    }

    /// Body split into lines
    ///
    /// Lines end at [`BODY_LINE_SEPARATOR`] or at a bare LF, so no line
    /// yielded here contains a line break.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

/// One newsgroup's ordered article set
///
/// Implementations must yield articles in strictly ascending id order, and
/// `count()` must equal the number of articles `articles()` yields.
pub trait NewsGroup: Send + Sync {
    /// Group name, unique within its source
    fn name(&self) -> &str;

    /// One-line description shown by LIST
    fn description(&self) -> &str;

    /// Look up an article by number
    fn lookup(&self, id: u64) -> Option<&Article>;

    /// Whether an article with this number exists
    fn contains(&self, id: u64) -> bool {
        self.lookup(id).is_some()
    }

    /// Iterate the articles in ascending id order
    fn articles(&self) -> Box<dyn Iterator<Item = &Article> + '_>;

    /// Article with the lowest number
    fn first(&self) -> Option<&Article>;

    /// Article with the highest number
    fn last(&self) -> Option<&Article>;

    /// Number of articles in the group
    fn count(&self) -> usize;
}

/// The whole group catalog
pub trait NewsSource: Send + Sync {
    /// Look up a group by name
    fn lookup(&self, name: &str) -> Option<&dyn NewsGroup>;

    /// Whether a group with this name exists
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Iterate the groups in catalog order
    fn groups(&self) -> Box<dyn Iterator<Item = &dyn NewsGroup> + '_>;
}

/// Build the source named by `config.source`
pub fn from_config(config: &ServerConfig) -> Result<Arc<dyn NewsSource>, ConfigError> {
    match config.source.as_str() {
        "random" => Ok(Arc::new(RandomSource::generate(&config.random))),
        "memory" => Ok(Arc::new(MemorySource::new())),
        other => Err(ConfigError::UnknownSource(other.to_string())),
    }
}
