//! NNTP command parsing and per-command wire rendering

// Module declarations
pub mod article;
pub mod capabilities;
pub mod group;
pub mod list;
pub mod over;

pub use article::*;
pub use capabilities::*;
pub use group::*;
pub use list::*;
pub use over::*;

/// One client command line, classified
///
/// Arguments are kept raw; each handler parses its own so that
/// precondition checks (such as a selected group) come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `MODE READER`
    ModeReader,
    /// `CAPABILITIES`
    Capabilities,
    /// `LIST` with no argument
    List,
    /// `LIST <keyword>` (not supported)
    ListVariant(&'a str),
    /// `GROUP <name>`
    Group(&'a str),
    /// `XOVER <range>`
    Xover(&'a str),
    /// `ARTICLE <number>`
    Article(&'a str),
    /// `QUIT`
    Quit,
    /// Empty line: the client hangs up
    Hangup,
    /// Anything else
    Unknown(&'a str),
}

/// Classify a command line
///
/// The line must already be stripped of its terminator. Keywords are
/// matched case-sensitively.
pub fn parse_command(line: &str) -> Command<'_> {
    match line {
        "" => return Command::Hangup,
        "MODE READER" => return Command::ModeReader,
        "CAPABILITIES" => return Command::Capabilities,
        "LIST" => return Command::List,
        "QUIT" => return Command::Quit,
        _ => {}
    }

    if let Some(arg) = argument(line, "LIST") {
        return Command::ListVariant(arg);
    }
    if let Some(arg) = argument(line, "GROUP") {
        return Command::Group(arg);
    }
    if let Some(arg) = argument(line, "XOVER") {
        return Command::Xover(arg);
    }
    if let Some(arg) = argument(line, "ARTICLE") {
        return Command::Article(arg);
    }

    Command::Unknown(line)
}

/// Argument after `keyword`, or `None` if the line is a different command
///
/// `GROUP` alone yields an empty argument; `GROUPS x` is not a `GROUP`.
fn argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}
