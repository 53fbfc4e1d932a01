//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that is
//! populated once at startup from environment variables (and an optional
//! `.env` file) and then passed to the components that need it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Copyright block appended to markdown sources when no footer template applies.
pub const DEFAULT_COPYRIGHT_TEXT: &str = "\n\n\n\
--------------------------------------------------------------------------------\n\
\n\
**© 2025 SnowWhite AI - All Rights Reserved**\n\n";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Pandoc executable and document decoration settings.
    pub pandoc: PandocConfig,

    /// Settings that were present but ignored. Configuration is read before
    /// the subscriber exists, so these are logged once logging is up.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,

    /// Directory for daily log files. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

/// Pandoc configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PandocConfig {
    /// Explicit path to the Pandoc executable; `PATH` is searched when unset.
    pub executable_path: Option<PathBuf>,

    /// Footer template passed with `--include-after-body`.
    /// When unset, `templates/footer.md` is looked up next to the binary
    /// and in the working directory.
    pub footer_template: Option<PathBuf>,

    /// In-memory copyright block for markdown sources.
    pub copyright: CopyrightConfig,
}

/// Copyright block settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyrightConfig {
    /// Whether markdown sources get the block appended.
    pub enabled: bool,

    /// The block itself, appended verbatim.
    pub text: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "pandoc-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
            log_dir: None,
        }
    }
}

impl Default for CopyrightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: DEFAULT_COPYRIGHT_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Recognized variables:
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL` (or `LOG_LEVEL`), `MCP_LOG_DIR`
    /// (or `LOG_DIR`), `MCP_LOG_TIMESTAMPS`, `PANDOC_PATH`,
    /// `PANDOC_FOOTER_PATH`, `PANDOC_COPYRIGHT`, `PANDOC_COPYRIGHT_TEXT`.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(name) = var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = var("MCP_LOG_LEVEL").or_else(|| var("LOG_LEVEL")) {
            config.logging.level = level;
        }

        if let Some(dir) = var("MCP_LOG_DIR").or_else(|| var("LOG_DIR")) {
            config.logging.log_dir = Some(PathBuf::from(dir));
        }

        if let Some(timestamps) = var("MCP_LOG_TIMESTAMPS") {
            match parse_flag(&timestamps) {
                Some(flag) => config.logging.with_timestamps = flag,
                None => config
                    .warnings
                    .push(format!("Ignoring invalid MCP_LOG_TIMESTAMPS value: {timestamps}")),
            }
        }

        if let Some(path) = var("PANDOC_PATH") {
            config.pandoc.executable_path = Some(PathBuf::from(path));
        }

        if let Some(path) = var("PANDOC_FOOTER_PATH") {
            config.pandoc.footer_template = Some(PathBuf::from(path));
        }

        if let Some(enabled) = var("PANDOC_COPYRIGHT") {
            match parse_flag(&enabled) {
                Some(flag) => config.pandoc.copyright.enabled = flag,
                None => config
                    .warnings
                    .push(format!("Ignoring invalid PANDOC_COPYRIGHT value: {enabled}")),
            }
        }

        if let Some(text) = var("PANDOC_COPYRIGHT_TEXT") {
            config.pandoc.copyright.text = text;
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.server.name, "pandoc-mcp-server");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_dir.is_none());
        assert!(config.pandoc.executable_path.is_none());
        assert!(config.pandoc.copyright.enabled);
        assert!(config.pandoc.copyright.text.contains("All Rights Reserved"));
    }

    #[test]
    fn test_pandoc_path_override() {
        let config = config_from(&[("PANDOC_PATH", "/opt/pandoc/bin/pandoc")]);
        assert_eq!(
            config.pandoc.executable_path,
            Some(PathBuf::from("/opt/pandoc/bin/pandoc"))
        );
    }

    #[test]
    fn test_prefixed_log_vars_win() {
        let config = config_from(&[
            ("LOG_LEVEL", "trace"),
            ("MCP_LOG_LEVEL", "warn"),
            ("LOG_DIR", "/var/log/pandoc"),
        ]);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.log_dir, Some(PathBuf::from("/var/log/pandoc")));
    }

    #[test]
    fn test_copyright_settings() {
        let config = config_from(&[
            ("PANDOC_COPYRIGHT", "off"),
            ("PANDOC_COPYRIGHT_TEXT", "\n\n(c) Example\n"),
        ]);
        assert!(!config.pandoc.copyright.enabled);
        assert_eq!(config.pandoc.copyright.text, "\n\n(c) Example\n");

        let config = config_from(&[("PANDOC_COPYRIGHT", "maybe")]);
        assert!(config.pandoc.copyright.enabled);
    }

    #[test]
    fn test_invalid_flags_are_reported() {
        let config = config_from(&[
            ("PANDOC_COPYRIGHT", "maybe"),
            ("MCP_LOG_TIMESTAMPS", "sometimes"),
        ]);
        assert!(config.pandoc.copyright.enabled);
        assert!(config.logging.with_timestamps);
        assert_eq!(config.warnings.len(), 2);
        assert!(config.warnings[0].contains("MCP_LOG_TIMESTAMPS"));
        assert!(config.warnings[1].contains("PANDOC_COPYRIGHT"));

        assert!(config_from(&[("PANDOC_COPYRIGHT", "off")]).warnings.is_empty());
    }

    #[test]
    fn test_empty_values_ignored() {
        let config = config_from(&[("PANDOC_PATH", ""), ("MCP_SERVER_NAME", "")]);
        assert!(config.pandoc.executable_path.is_none());
        assert_eq!(config.server.name, "pandoc-mcp-server");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("sometimes"), None);
    }
}
