//! Rules deciding where each result-set entry ends up.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default prefix marking result keys that become annotations.
pub const DEFAULT_ANNOTATION_PREFIX: &str = "ann.";

/// Result keys that always become labels when present.
pub const DEFAULT_LABEL_KEYS: &[&str] = &["host", "severity"];

/// Destination of a single result-set entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Copied into the label set under the given name.
    Label(&'a str),
    /// Copied into the annotation set under the given (prefix-stripped) name.
    Annotation(&'a str),
    /// Not forwarded.
    Dropped,
}

/// Translation settings, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Result keys starting with this prefix become annotations.
    pub annotation_prefix: String,
    /// Result keys copied into labels in addition to [`DEFAULT_LABEL_KEYS`].
    pub extra_label_keys: Vec<String>,
    /// Offset added to the start time to compute `endsAt` (e.g. `1h`).
    pub ends_at: Option<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            annotation_prefix: DEFAULT_ANNOTATION_PREFIX.to_string(),
            extra_label_keys: Vec::new(),
            ends_at: None,
        }
    }
}

impl TransformConfig {
    /// Creates a configuration with the default prefix and no extra labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annotation prefix. An empty prefix disables annotations.
    #[must_use]
    pub fn with_annotation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.annotation_prefix = prefix.into();
        self
    }

    /// Adds an extra label key.
    #[must_use]
    pub fn with_label_key(mut self, key: impl Into<String>) -> Self {
        self.extra_label_keys.push(key.into());
        self
    }

    /// Adds label keys from a comma-separated list, skipping blank entries.
    #[must_use]
    pub fn with_label_keys_csv(mut self, csv: &str) -> Self {
        self.extra_label_keys.extend(
            csv.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Sets the end-time offset. Blank strings clear it.
    #[must_use]
    pub fn with_ends_at(mut self, offset: impl Into<String>) -> Self {
        let offset = offset.into();
        self.ends_at = if offset.trim().is_empty() {
            None
        } else {
            Some(offset.trim().to_string())
        };
        self
    }

    /// Returns true if `key` is copied into labels.
    #[must_use]
    pub fn is_label_key(&self, key: &str) -> bool {
        DEFAULT_LABEL_KEYS.contains(&key) || self.extra_label_keys.iter().any(|k| k == key)
    }

    /// Decides where a result-set entry goes.
    ///
    /// Non-string values are always dropped. The annotation prefix is checked
    /// before the label allow-list, so a key is never routed to both sets.
    #[must_use]
    pub fn route<'a>(&self, key: &'a str, value: &Value) -> Route<'a> {
        if !value.is_string() {
            return Route::Dropped;
        }

        if !self.annotation_prefix.is_empty() {
            if let Some(name) = key.strip_prefix(self.annotation_prefix.as_str()) {
                if !name.is_empty() {
                    return Route::Annotation(name);
                }
            }
        }

        if self.is_label_key(key) {
            Route::Label(key)
        } else {
            Route::Dropped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn default_config() {
        let config = TransformConfig::default();

        assert_eq!(config.annotation_prefix, "ann.");
        assert!(config.extra_label_keys.is_empty());
        assert!(config.ends_at.is_none());
    }

    #[test]
    fn label_keys_from_csv() {
        let config = TransformConfig::new().with_label_keys_csv("team, env,,  ,region");

        assert_eq!(config.extra_label_keys, vec!["team", "env", "region"]);
    }

    #[test]
    fn empty_csv_adds_nothing() {
        let config = TransformConfig::new().with_label_keys_csv("");

        assert!(config.extra_label_keys.is_empty());
    }

    #[test]
    fn blank_ends_at_is_none() {
        assert_eq!(TransformConfig::new().with_ends_at("  ").ends_at, None);
        assert_eq!(
            TransformConfig::new().with_ends_at(" 1h ").ends_at,
            Some("1h".to_string())
        );
    }

    #[test_case("ann.runbook", Route::Annotation("runbook") ; "prefixed key")]
    #[test_case("ann.", Route::Dropped ; "bare prefix")]
    #[test_case("host", Route::Label("host") ; "default label")]
    #[test_case("severity", Route::Label("severity") ; "default severity label")]
    #[test_case("team", Route::Label("team") ; "configured label")]
    #[test_case("count", Route::Dropped ; "unknown key")]
    #[test_case("ann.host", Route::Annotation("host") ; "prefix wins over label")]
    fn routes_string_values(key: &str, expected: Route<'_>) {
        let config = TransformConfig::new().with_label_key("team");

        assert_eq!(config.route(key, &json!("value")), expected);
    }

    #[test_case(json!(42) ; "number")]
    #[test_case(json!(true) ; "bool")]
    #[test_case(json!(null) ; "null")]
    #[test_case(json!(["a"]) ; "array")]
    #[test_case(json!({"a": "b"}) ; "object")]
    fn non_string_values_are_dropped(value: Value) {
        let config = TransformConfig::new();

        assert_eq!(config.route("host", &value), Route::Dropped);
        assert_eq!(config.route("ann.note", &value), Route::Dropped);
    }

    #[test]
    fn custom_prefix() {
        let config = TransformConfig::new().with_annotation_prefix("a_");

        assert_eq!(config.route("a_desc", &json!("x")), Route::Annotation("desc"));
        assert_eq!(config.route("ann.desc", &json!("x")), Route::Dropped);
    }

    #[test]
    fn empty_prefix_disables_annotations() {
        let config = TransformConfig::new().with_annotation_prefix("");

        assert_eq!(config.route("desc", &json!("x")), Route::Dropped);
        assert_eq!(config.route("host", &json!("x")), Route::Label("host"));
    }
}
