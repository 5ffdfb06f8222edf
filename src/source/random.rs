//! Synthetic news source filled with generated articles

use chrono::{TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::{Article, BODY_LINE_SEPARATOR, MemoryGroup, MemorySource, NewsGroup, NewsSource};
use crate::config::{MAX_RANDOM_ARTICLES, RandomConfig};

const SUBJECT_WORDS: &[&str] = &[
    "status", "report", "question", "about", "the", "new", "server", "weekly", "digest", "help",
    "wanted", "update", "release", "notes", "fixed", "broken", "config", "test",
];

const SENDERS: &[&str] = &[
    "fromguy",
    "fromotherguy",
    "news@localhost",
    "Anonymous <anon@nntpub.invalid>",
    "Operator <operator@nntpub.invalid>",
];

const BODY_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "hello", "yo!", "test", "msg", "please", "ignore",
    "this", "article", "was", "generated", "for", "reading",
];

/// A [`NewsSource`] whose groups are filled with generated articles
///
/// Generation happens once at construction; afterwards the catalog is
/// read-only like any other source.
#[derive(Debug, Clone)]
pub struct RandomSource {
    inner: MemorySource,
}

impl RandomSource {
    /// Generate a catalog from the given settings
    ///
    /// With `seed` set the catalog is identical on every call apart from
    /// timestamps, which are relative to the current time.
    pub fn generate(config: &RandomConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let articles = if config.articles > MAX_RANDOM_ARTICLES {
            warn!(
                requested = config.articles,
                limit = MAX_RANDOM_ARTICLES,
                "clamping generated article count"
            );
            MAX_RANDOM_ARTICLES
        } else {
            config.articles
        };

        let mut inner = MemorySource::new();
        for (name, description) in &config.groups {
            let group = generate_group(&mut rng, name, description, articles);
            debug!(group = %name, articles = group.count(), "generated group");
            if let Err(group) = inner.insert(group) {
                debug!(group = %group.name(), "skipping duplicate group");
            }
        }

        Self { inner }
    }
}

fn generate_group(rng: &mut StdRng, name: &str, description: &str, articles: usize) -> MemoryGroup {
    let mut group = MemoryGroup::new(name, description);
    // Older articles get lower numbers.
    let span = i64::try_from(articles).unwrap_or(i64::MAX).saturating_mul(90);
    let mut created = Utc::now() - TimeDelta::try_minutes(span).unwrap_or(TimeDelta::zero());

    let mut id: u64 = rng.gen_range(1..=10);
    for _ in 0..articles {
        created += TimeDelta::minutes(rng.gen_range(1..=90));
        let article = Article::with_date(
            id,
            words(rng, SUBJECT_WORDS, 2..=6),
            SENDERS.choose(rng).copied().unwrap_or("news@localhost"),
            body(rng),
            created,
        );
        let _ = group.insert(article);
        id += rng.gen_range(1..=3);
    }

    group
}

fn words(rng: &mut StdRng, pool: &[&str], count: std::ops::RangeInclusive<usize>) -> String {
    let count = rng.gen_range(count);
    (0..count)
        .filter_map(|_| pool.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn body(rng: &mut StdRng) -> String {
    let lines = rng.gen_range(1..=4);
    (0..lines)
        .map(|_| words(rng, BODY_WORDS, 1..=8))
        .collect::<Vec<_>>()
        .join(BODY_LINE_SEPARATOR)
}

impl NewsSource for RandomSource {
    fn lookup(&self, name: &str) -> Option<&dyn NewsGroup> {
        self.inner.lookup(name)
    }

    fn groups(&self) -> Box<dyn Iterator<Item = &dyn NewsGroup> + '_> {
        self.inner.groups()
    }
}
