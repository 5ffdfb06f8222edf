//! In-memory article arenas

use super::{Article, NewsGroup, NewsSource};

/// A newsgroup held entirely in memory
///
/// Articles live in a vector kept sorted by id, so lookups are a binary
/// search and iteration is already in wire order.
#[derive(Debug, Clone)]
pub struct MemoryGroup {
    name: String,
    description: String,
    articles: Vec<Article>,
}

impl MemoryGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            articles: Vec::new(),
        }
    }

    /// Add an article, keeping id order
    ///
    /// Returns the article back if its id is already taken.
    pub fn insert(&mut self, article: Article) -> Result<(), Article> {
        match self.articles.binary_search_by_key(&article.id, |a| a.id) {
            Ok(_) => Err(article),
            Err(pos) => {
                self.articles.insert(pos, article);
                Ok(())
            }
        }
    }

    /// Builder-style [`insert`](Self::insert) that drops duplicate ids
    pub fn with_article(mut self, article: Article) -> Self {
        let _ = self.insert(article);
        self
    }
}

impl NewsGroup for MemoryGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn lookup(&self, id: u64) -> Option<&Article> {
        self.articles
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|pos| &self.articles[pos])
    }

    fn articles(&self) -> Box<dyn Iterator<Item = &Article> + '_> {
        Box::new(self.articles.iter())
    }

    fn first(&self) -> Option<&Article> {
        self.articles.first()
    }

    fn last(&self) -> Option<&Article> {
        self.articles.last()
    }

    fn count(&self) -> usize {
        self.articles.len()
    }
}

/// A catalog of [`MemoryGroup`]s in declaration order
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    groups: Vec<MemoryGroup>,
}

impl MemorySource {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group
    ///
    /// Returns the group back if its name is already taken.
    pub fn insert(&mut self, group: MemoryGroup) -> Result<(), MemoryGroup> {
        if self.groups.iter().any(|g| g.name == group.name) {
            return Err(group);
        }
        self.groups.push(group);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) that drops duplicate names
    pub fn with_group(mut self, group: MemoryGroup) -> Self {
        let _ = self.insert(group);
        self
    }
}

impl NewsSource for MemorySource {
    fn lookup(&self, name: &str) -> Option<&dyn NewsGroup> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g as &dyn NewsGroup)
    }

    fn groups(&self) -> Box<dyn Iterator<Item = &dyn NewsGroup> + '_> {
        Box::new(self.groups.iter().map(|g| g as &dyn NewsGroup))
    }
}
