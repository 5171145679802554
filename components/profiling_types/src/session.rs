//! Per-session profiling configuration
//!
//! The configuration is written by an out-of-scope administrative endpoint
//! and read fresh by the middleware on every request. The core never mutates
//! it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque session identifier attached to a request (via request extensions).
///
/// The host framework's session layer is responsible for minting these; the
/// middleware only uses them as lookup keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Create a session id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One-or-many printer format identifiers.
///
/// The session store may hold either a single identifier or an ordered list;
/// both deserialize into this enum. Order is preserved and duplicates are
/// allowed (two entries of the same kind yield two distinct artifacts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PrinterSelection {
    /// A single format identifier
    One(String),
    /// An ordered sequence of format identifiers
    Many(Vec<String>),
}

impl PrinterSelection {
    /// The configured format identifiers, in order
    pub fn kinds(&self) -> Vec<&str> {
        match self {
            Self::One(kind) => vec![kind.as_str()],
            Self::Many(kinds) => kinds.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for PrinterSelection {
    fn default() -> Self {
        Self::One("flat".to_string())
    }
}

/// Normalized set of route formats for which profiling is skipped.
///
/// Parsed from the raw comma-separated configuration string: tokens are
/// trimmed and lowercased, empty tokens are dropped. Membership tests are
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExcludeFormats {
    tokens: HashSet<String>,
}

impl ExcludeFormats {
    /// Parse a raw comma-separated token list (e.g. `"png, jpeg, js"`)
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();
        Self { tokens }
    }

    /// Whether `format` is excluded (case-insensitive)
    pub fn contains(&self, format: &str) -> bool {
        self.tokens.contains(&format.trim().to_lowercase())
    }

    /// Whether no formats are excluded
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Per-session profiling configuration
///
/// Held in session storage under a namespaced key. A missing entry is
/// equivalent to the default: profiling enabled, flat printer, no excluded
/// formats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfilingConfig {
    /// Whether profiling is enabled for this session.
    /// Absent in stored form means enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Output formats to render after a profiled request
    #[serde(default)]
    pub printers: PrinterSelection,

    /// Raw comma-separated list of route formats to skip
    #[serde(default)]
    pub exclude_formats: String,
}

fn default_enabled() -> bool {
    true
}

impl SessionProfilingConfig {
    /// Parse the raw exclusion list into a normalized set
    pub fn excludes(&self) -> ExcludeFormats {
        ExcludeFormats::parse(&self.exclude_formats)
    }
}

impl Default for SessionProfilingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            printers: PrinterSelection::default(),
            exclude_formats: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_enabled() {
        let config = SessionProfilingConfig::default();

        assert!(config.enabled);
        assert_eq!(config.printers, PrinterSelection::One("flat".to_string()));
        assert!(config.excludes().is_empty());
    }

    #[test]
    fn test_enabled_defaults_to_true_when_absent() {
        let config: SessionProfilingConfig = serde_json::from_str(r#"{}"#).unwrap();

        assert!(config.enabled);
    }

    #[test]
    fn test_enabled_false_only_when_explicit() {
        let config: SessionProfilingConfig =
            serde_json::from_str(r#"{"enabled": false}"#).unwrap();

        assert!(!config.enabled);
    }

    #[test]
    fn test_printers_accepts_single_string() {
        let config: SessionProfilingConfig =
            serde_json::from_str(r#"{"printers": "graph_html"}"#).unwrap();

        assert_eq!(config.printers.kinds(), vec!["graph_html"]);
    }

    #[test]
    fn test_printers_accepts_sequence() {
        let config: SessionProfilingConfig =
            serde_json::from_str(r#"{"printers": ["flat", "dot", "flat"]}"#).unwrap();

        // Order and duplicates preserved
        assert_eq!(config.printers.kinds(), vec!["flat", "dot", "flat"]);
    }

    #[test]
    fn test_exclude_formats_parsing() {
        let excludes = ExcludeFormats::parse("png, JPEG ,js,,  ");

        assert!(excludes.contains("png"));
        assert!(excludes.contains("jpeg"));
        assert!(excludes.contains("JS"));
        assert!(!excludes.contains("html"));
        assert!(!excludes.contains(""));
    }

    #[test]
    fn test_exclude_formats_empty_raw_string() {
        let excludes = ExcludeFormats::parse("");

        assert!(excludes.is_empty());
        assert!(!excludes.contains("html"));
    }

    #[test]
    fn test_config_round_trip() {
        let config = SessionProfilingConfig {
            enabled: false,
            printers: PrinterSelection::Many(vec!["flat".into(), "dot".into()]),
            exclude_formats: "png, jpeg".to_string(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let decoded: SessionProfilingConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, config);
    }
}
