//! ARTICLE rendering and article addressing helpers

use chrono::{DateTime, Utc};

use crate::error::{NntpError, Result};
use crate::source::Article;

/// Synthesized message-id for an article: `<id@domain>`
pub fn message_id(id: u64, domain: &str) -> String {
    format!("<{id}@{domain}>")
}

/// Date header value (RFC 5322 format)
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc2822()
}

/// Parse an article number argument
///
/// Only plain ASCII digits are accepted; signs and whitespace are not.
pub fn parse_article_number(token: &str) -> Result<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NntpError::InvalidArticleNumber(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| NntpError::InvalidArticleNumber(token.to_string()))
}

/// Text of the 220 status line: "n message-id"
pub fn article_follows_text(article: &Article, domain: &str) -> String {
    format!("{} {}", article.id, message_id(article.id, domain))
}

/// Header block, blank separator, then one entry per body line
pub fn article_lines(article: &Article, domain: &str) -> Vec<String> {
    let mut lines = vec![
        format!("From: {}", article.sender),
        format!("Subject: {}", article.subject),
        format!("Date: {}", format_date(&article.created)),
        format!("Message-ID: {}", message_id(article.id, domain)),
        String::new(),
    ];
    lines.extend(article.body_lines().map(str::to_string));
    lines
}
