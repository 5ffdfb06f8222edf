//! GROUP response rendering

use crate::source::NewsGroup;

/// Group summary reported by the GROUP command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupInfo {
    /// Number of articles in the group
    pub count: u64,
    /// Number of the first article (0 when empty)
    pub first: u64,
    /// Number of the last article (0 when empty)
    pub last: u64,
}

impl GroupInfo {
    /// Summarize a group
    pub fn of(group: &dyn NewsGroup) -> Self {
        Self {
            count: group.count() as u64,
            first: group.first().map_or(0, |a| a.id),
            last: group.last().map_or(0, |a| a.id),
        }
    }
}

/// Text of the 211 status line: "count first last group-name"
pub fn group_selected_text(group: &dyn NewsGroup) -> String {
    let info = GroupInfo::of(group);
    format!("{} {} {} {}", info.count, info.first, info.last, group.name())
}
