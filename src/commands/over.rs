//! XOVER range parsing and overview rendering

use crate::commands::article::{format_date, message_id, parse_article_number};
use crate::error::{NntpError, Result};
use crate::source::Article;

/// Status text for the XOVER reply
pub const OVERVIEW_TEXT: &str = "Overview information follows";

/// Article range argument of XOVER
///
/// `start: None` is the single-article form and selects exactly `end`.
/// `end: None` is the open form and runs to the group's last article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleRange {
    /// First article number, unset for the single-article form
    pub start: Option<u64>,
    /// Last article number, unset for the open form
    pub end: Option<u64>,
}

impl ArticleRange {
    /// Whether `id` falls inside the range
    pub fn contains(&self, id: u64) -> bool {
        match (self.start, self.end) {
            (None, Some(end)) => id == end,
            (Some(start), None) => id >= start,
            (Some(start), Some(end)) => start <= id && id <= end,
            (None, None) => false,
        }
    }
}

/// Parse an XOVER range: `N`, `N-` or `N-M`
pub fn parse_range(token: &str) -> Result<ArticleRange> {
    if token.is_empty() {
        return Err(NntpError::MissingArgument("XOVER"));
    }

    let invalid = || NntpError::InvalidArticleNumber(token.to_string());

    if let Some(start) = token.strip_suffix('-') {
        let start = parse_article_number(start).map_err(|_| invalid())?;
        return Ok(ArticleRange {
            start: Some(start),
            end: None,
        });
    }

    if let Some((start, end)) = token.split_once('-') {
        let start = parse_article_number(start).map_err(|_| invalid())?;
        let end = parse_article_number(end).map_err(|_| invalid())?;
        return Ok(ArticleRange {
            start: Some(start),
            end: Some(end),
        });
    }

    let id = parse_article_number(token)?;
    Ok(ArticleRange {
        start: None,
        end: Some(id),
    })
}

/// Strip CR, LF and TAB so a field cannot break the overview row
pub fn clean_field(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect()
}

/// Render one overview row
///
/// Fields: number, subject, from, date, message-id, references (empty),
/// byte length of the cleaned body, and a fixed line count of 1.
pub fn xover_line(article: &Article, domain: &str) -> String {
    let body = clean_field(&article.body);
    format!(
        "{}\t{}\t{}\t{}\t{}\t\t{}\t1",
        article.id,
        clean_field(&article.subject),
        clean_field(&article.sender),
        format_date(&article.created),
        message_id(article.id, domain),
        body.len(),
    )
}
