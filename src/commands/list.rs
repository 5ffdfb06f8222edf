//! LIST response rendering

use crate::source::NewsSource;

/// Status text for the LIST reply
pub const LIST_TEXT: &str = r#"Descriptions in form "group description""#;

/// One LIST row per group, in catalog order: "name description"
pub fn list_lines(source: &dyn NewsSource) -> Vec<String> {
    source
        .groups()
        .map(|g| format!("{} {}", g.name(), g.description()))
        .collect()
}
