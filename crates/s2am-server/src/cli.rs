//! Command-line argument parsing with clap.

use clap::Parser;
use s2am_alerts::{TransformConfig, DEFAULT_ANNOTATION_PREFIX};

use crate::config::{ServerConfig, DEFAULT_ALERTMANAGER_URL, DEFAULT_BIND_ADDR};
use crate::logging::{LogFormat, LogLevel};

/// Relay Splunk webhook alerts to Prometheus Alertmanager.
#[derive(Parser, Debug, Clone)]
#[command(name = "splunk2alertmanager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL of the Alertmanager instance.
    #[arg(short = 'u', long, default_value = DEFAULT_ALERTMANAGER_URL)]
    pub alertmanager_url: String,

    /// Bind address for the HTTP server.
    #[arg(short, long = "bind", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Log level.
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format.
    #[arg(short = 'f', long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Duration added to the start time for endsAt (e.g. 1h, 30m, 15s); empty for none.
    #[arg(short, long, default_value = "")]
    pub ends_at: String,

    /// Comma-separated result fields to copy into labels.
    #[arg(long, default_value = "")]
    pub add_labels: String,

    /// Prefix marking result fields that become annotations.
    #[arg(short = 'p', long, default_value = DEFAULT_ANNOTATION_PREFIX)]
    pub annotation_prefix: String,
}

impl Cli {
    /// Converts parsed flags into the server configuration.
    #[must_use]
    pub fn into_config(self) -> ServerConfig {
        let transform = TransformConfig::new()
            .with_annotation_prefix(self.annotation_prefix)
            .with_label_keys_csv(&self.add_labels)
            .with_ends_at(self.ends_at);

        ServerConfig::new(self.alertmanager_url)
            .with_bind_addr(self.bind)
            .with_log_level(self.log_level)
            .with_log_format(self.log_format)
            .with_transform(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["splunk2alertmanager"]).unwrap();
        let config = cli.into_config();

        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from([
            "splunk2alertmanager",
            "-u",
            "http://am:9093",
            "-b",
            "0.0.0.0:8080",
            "-l",
            "debug",
            "-f",
            "json",
            "-e",
            "1h",
            "-p",
            "note_",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(config.alertmanager_url, "http://am:9093");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.transform.ends_at, Some("1h".to_string()));
        assert_eq!(config.transform.annotation_prefix, "note_");
    }

    #[test]
    fn long_flags() {
        let cli = Cli::try_parse_from([
            "splunk2alertmanager",
            "--alertmanager-url",
            "https://am.example.com",
            "--bind",
            "127.0.0.1:9000",
            "--log-level",
            "warn",
            "--log-format",
            "text",
            "--ends-at",
            "30m",
            "--add-labels",
            "team,env",
            "--annotation-prefix",
            "a.",
        ])
        .unwrap();
        let config = cli.into_config();

        assert_eq!(config.alertmanager_url, "https://am.example.com");
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.transform.extra_label_keys, vec!["team", "env"]);
        assert_eq!(config.transform.annotation_prefix, "a.");
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["splunk2alertmanager", "-l", "trace"]).is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["splunk2alertmanager", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn version_flag() {
        let err = Cli::try_parse_from(["splunk2alertmanager", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
