//! Translation of Splunk webhook alerts into Prometheus Alertmanager alerts.
//!
//! `s2am-alerts` holds everything that does not depend on the HTTP server:
//! the wire types on both sides, the rules deciding which search result
//! fields become labels or annotations, and the client that posts the
//! translated alert to Alertmanager.
//!
//! # Routing
//!
//! Every string-valued field of the search result goes to exactly one place:
//!
//! - keys starting with the annotation prefix (default `ann.`) become
//!   annotations, with the prefix stripped;
//! - `host`, `severity` and any configured extra keys become labels;
//! - everything else, and every non-string value, is dropped.
//!
//! # Example
//!
//! ```rust
//! use s2am_alerts::{transform, SplunkEvent, TransformConfig};
//!
//! let body = br#"{
//!     "search_name": "Failed logins",
//!     "app": "search",
//!     "results_link": "http://splunk:8000/app/search/@go?sid=42",
//!     "result": {"host": "web-01", "ann.runbook": "http://wiki/failed-logins", "count": "17"}
//! }"#;
//!
//! let event = SplunkEvent::from_slice(body).unwrap();
//! let config = TransformConfig::new().with_ends_at("1h");
//! let alert = transform(&event, &config, chrono::Utc::now()).unwrap();
//!
//! assert_eq!(alert.labels["alertname"], "Failed logins");
//! assert_eq!(alert.labels["host"], "web-01");
//! assert_eq!(alert.annotations["runbook"], "http://wiki/failed-logins");
//! assert!(!alert.labels.contains_key("count"));
//! assert!(alert.ends_at.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod duration;
pub mod error;
pub mod routing;
pub mod transform;
pub mod types;


// Re-export main types at crate root
pub use client::{alerts_endpoint, AlertmanagerClient, ALERTS_PATH};
pub use duration::parse_duration;
pub use error::{AlertError, Result};
pub use routing::{Route, TransformConfig, DEFAULT_ANNOTATION_PREFIX, DEFAULT_LABEL_KEYS};
pub use transform::{
    transform, ALERTNAME_LABEL, APP_LABEL, LINK_ANNOTATION, SUMMARY_ANNOTATION,
};
pub use types::{Alert, AlertStatus, SplunkEvent};
