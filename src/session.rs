//! Per-connection session state and command handlers
//!
//! A [`Session`] only remembers which group is selected. Handlers write their
//! reply (including error statuses) into a [`Reply`] and return an error
//! afterwards when the command did not succeed, so callers can log it and
//! carry on.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::commands::{
    self, ArticleRange, CAPABILITIES_TEXT, CAPABILITY_LINES, Command, LIST_TEXT, OVERVIEW_TEXT,
};
use crate::error::{NntpError, Result};
use crate::response::{Reply, codes};
use crate::source::{NewsGroup, NewsSource};

/// What the connection loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading commands
    Continue,
    /// Flush the reply and close the connection
    Close,
}

/// State of one client connection
pub struct Session {
    domain: Arc<str>,
    source: Arc<dyn NewsSource>,
    selected: Option<String>,
}

impl Session {
    /// Create a session with no group selected
    pub fn new(domain: Arc<str>, source: Arc<dyn NewsSource>) -> Self {
        Self {
            domain,
            source,
            selected: None,
        }
    }

    /// Name of the currently selected group
    pub fn selected_group(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Domain used in the banner and message-ids
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Append the 201 greeting
    pub fn banner(&self, reply: &mut Reply) {
        reply.status(
            codes::READY_NO_POSTING,
            &commands::banner_text(&self.domain),
        );
    }

    /// Handle one command line
    ///
    /// Errors are never fatal: the matching status line (if any) is already in
    /// `reply` when one is returned.
    pub fn dispatch(&mut self, line: &str, reply: &mut Reply) -> Result<Flow> {
        let command = commands::parse_command(line);
        debug!(?command, "dispatching");

        match command {
            Command::Hangup => return Ok(Flow::Close),
            Command::Quit => {
                reply.status(codes::CLOSING_CONNECTION, "Closing connection");
                return Ok(Flow::Close);
            }
            Command::ModeReader => self.banner(reply),
            Command::Capabilities => {
                reply.block(codes::CAPABILITY_LIST, CAPABILITIES_TEXT, CAPABILITY_LINES)
            }
            Command::List => self.list(reply),
            Command::ListVariant(keyword) => {
                debug!(keyword, "unsupported LIST variant");
                reply.status(codes::FEATURE_NOT_SUPPORTED, "Data item not stored");
            }
            Command::Group(name) => {
                let name = required(name, "GROUP", reply)?;
                self.group(name, reply)?;
                self.selected = Some(name.to_string());
            }
            Command::Xover(range) => self.xover(range, reply)?,
            Command::Article(id) => self.article(id, reply)?,
            Command::Unknown(line) => warn!(command = %line, "unrecognized command"),
        }

        Ok(Flow::Continue)
    }

    /// Append the LIST block
    pub fn list(&self, reply: &mut Reply) {
        reply.block(
            codes::LIST_INFORMATION_FOLLOWS,
            LIST_TEXT,
            commands::list_lines(self.source.as_ref()),
        );
    }

    /// Append the GROUP status for `name`
    ///
    /// Does not change the selection; [`dispatch`](Self::dispatch) does that
    /// once this succeeds.
    pub fn group(&self, name: &str, reply: &mut Reply) -> Result<()> {
        let Some(group) = self.source.lookup(name) else {
            reply.status(codes::NO_SUCH_GROUP, "No such group");
            return Err(NntpError::NoSuchGroup(name.to_string()));
        };
        reply.status(
            codes::GROUP_SELECTED,
            &commands::group_selected_text(group),
        );
        Ok(())
    }

    /// Append the XOVER block for `range` in the selected group
    pub fn xover(&self, range: &str, reply: &mut Reply) -> Result<()> {
        let group = self.selected(reply)?;
        let range: ArticleRange = match commands::parse_range(range) {
            Ok(range) => range,
            Err(err) => return Err(syntax_error(err, reply)),
        };

        let domain = &self.domain;
        let rows = group
            .articles()
            .filter(|a| range.contains(a.id))
            .map(|a| commands::xover_line(a, domain));
        reply.block(codes::OVERVIEW_INFO_FOLLOWS, OVERVIEW_TEXT, rows);
        Ok(())
    }

    /// Append the ARTICLE block for `id` in the selected group
    pub fn article(&self, id: &str, reply: &mut Reply) -> Result<()> {
        let group = self.selected(reply)?;
        let id = required(id, "ARTICLE", reply)?;
        let id = match commands::parse_article_number(id) {
            Ok(id) => id,
            Err(err) => return Err(syntax_error(err, reply)),
        };

        let Some(article) = group.articles().find(|a| a.id == id) else {
            reply.status(codes::NO_SUCH_ARTICLE_NUMBER, "No message with that number");
            return Err(NntpError::NoSuchArticle(id));
        };

        reply.block(
            codes::ARTICLE_FOLLOWS,
            &commands::article_follows_text(article, &self.domain),
            commands::article_lines(article, &self.domain),
        );
        Ok(())
    }

    fn selected(&self, reply: &mut Reply) -> Result<&dyn NewsGroup> {
        match self
            .selected
            .as_deref()
            .and_then(|name| self.source.lookup(name))
        {
            Some(group) => Ok(group),
            None => {
                reply.status(codes::NO_GROUP_SELECTED, "No newsgroup currently selected");
                Err(NntpError::NoGroupSelected)
            }
        }
    }
}

fn required<'a>(arg: &'a str, command: &'static str, reply: &mut Reply) -> Result<&'a str> {
    if arg.is_empty() {
        return Err(syntax_error(NntpError::MissingArgument(command), reply));
    }
    Ok(arg)
}

fn syntax_error(err: NntpError, reply: &mut Reply) -> NntpError {
    reply.status(codes::COMMAND_SYNTAX_ERROR, "Syntax error");
    err
}
