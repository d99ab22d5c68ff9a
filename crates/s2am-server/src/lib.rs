//! # s2am-server
//!
//! HTTP listener that receives Splunk webhook alert actions and relays each
//! one to Prometheus Alertmanager, built on the axum HTTP framework.
//!
//! Every request is handled on its own: the body is decoded, translated by
//! [`s2am_alerts::transform`] and posted once to Alertmanager. Nothing is
//! queued or retried.
//!
//! ## Example
//!
//! ```rust,no_run
//! use s2am_server::{RelayServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::new("http://localhost:9093").with_bind_addr("0.0.0.0:8080");
//!     let server = RelayServer::new(config).unwrap();
//!     // server.serve().await.unwrap();
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/splunk-webhook` | POST | Translate a Splunk alert and forward it |
//!
//! | Outcome | Status |
//! |---------|--------|
//! | Alert accepted by Alertmanager | 200 |
//! | Empty or malformed body, invalid end-time offset | 400 |
//! | Alertmanager unreachable or answered non-200 | 500 |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use cli::Cli;
pub use config::{ServerConfig, WEBHOOK_PATH};
pub use error::{ServerError, ServerResult};
pub use handlers::ForwardResponse;
pub use logging::{init_logging, LogFormat, LogLevel};
pub use server::{shutdown_signal, RelayServer};
pub use state::RelayState;
