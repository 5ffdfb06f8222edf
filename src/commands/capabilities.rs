//! CAPABILITIES and greeting rendering

/// Status text for the CAPABILITIES reply
pub const CAPABILITIES_TEXT: &str = "Capability list follows";

/// Capabilities advertised by the server (RFC 3977 §5.2)
pub const CAPABILITY_LINES: &[&str] = &[
    "VERSION 2",
    "READER",
    "LIST",
    "XOVER",
    "IMPLEMENTATION NNTPub",
];

/// Text of the 201 greeting: "domain NNTPub"
pub fn banner_text(domain: &str) -> String {
    format!("{domain} NNTPub")
}
