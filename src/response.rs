//! NNTP response codes and reply serialization
//!
//! Every reply is built into a [`Reply`] buffer first and written to the
//! client in one go once the command has been handled. Lines always end in
//! CRLF and multi-line blocks end with a lone `.` line.
//!
//! Leading dots in block lines are not byte-stuffed, so a body line that is
//! exactly `.` ends the block early on the client side.

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Line terminator for everything sent on the wire
pub const CRLF: &str = "\r\n";

/// Multi-line block terminator line
pub const BLOCK_TERMINATOR: &str = ".";

/// Buffered reply for a single command
#[derive(Debug, Default, Clone)]
pub struct Reply {
    buf: Vec<u8>,
}

impl Reply {
    /// Create an empty reply
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a status line: `<code> <text>`
    pub fn status(&mut self, code: u16, text: &str) {
        self.line(&format!("{code} {text}"));
    }

    /// Append one line
    ///
    /// CR and LF inside `text` are dropped so one call is always one wire line.
    pub fn line(&mut self, text: &str) {
        if text.contains(['\r', '\n']) {
            let cleaned: String = text.chars().filter(|c| *c != '\r' && *c != '\n').collect();
            self.buf.extend_from_slice(cleaned.as_bytes());
        } else {
            self.buf.extend_from_slice(text.as_bytes());
        }
        self.buf.extend_from_slice(CRLF.as_bytes());
    }

    /// Append the block terminator line
    pub fn end_block(&mut self) {
        self.line(BLOCK_TERMINATOR);
    }

    /// Append a status line, the given lines, then the block terminator
    pub fn block<I, S>(&mut self, code: u16, text: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.status(code, text);
        for line in lines {
            self.line(line.as_ref());
        }
        self.end_block();
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Wire bytes accumulated so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Discard the buffered bytes
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write the buffered bytes, flush, and reset the buffer
    pub async fn write_to<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        if self.buf.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.buf).await?;
        writer.flush().await?;
        self.buf.clear();
        Ok(())
    }
}

/// NNTP response codes used by the server (RFC 3977)
pub mod codes {
    // 1xx - Informational
    /// Capability list follows (RFC 3977 Section 5.2)
    pub const CAPABILITY_LIST: u16 = 101;

    // 2xx - Success
    /// Server ready, no posting
    pub const READY_NO_POSTING: u16 = 201;
    /// Closing connection
    pub const CLOSING_CONNECTION: u16 = 205;
    /// Group selected
    pub const GROUP_SELECTED: u16 = 211;
    /// List of newsgroups follows (RFC 3977 Section 7.6)
    pub const LIST_INFORMATION_FOLLOWS: u16 = 215;
    /// Article follows
    pub const ARTICLE_FOLLOWS: u16 = 220;
    /// Overview information follows
    pub const OVERVIEW_INFO_FOLLOWS: u16 = 224;

    // 4xx - Temporary errors
    /// No such newsgroup
    pub const NO_SUCH_GROUP: u16 = 411;
    /// No newsgroup selected
    pub const NO_GROUP_SELECTED: u16 = 412;
    /// No article with that number
    pub const NO_SUCH_ARTICLE_NUMBER: u16 = 423;

    // 5xx - Permanent errors
    /// Command syntax error
    pub const COMMAND_SYNTAX_ERROR: u16 = 501;
    /// Feature not supported / optional functionality absent (RFC 3977)
    pub const FEATURE_NOT_SUPPORTED: u16 = 503;
}
