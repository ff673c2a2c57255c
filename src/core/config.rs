//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wayfinder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Route definitions are loaded separately, from a TOML or JSON file
//! picked by extension.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::root::Settings;
use crate::core::routes::RootDef;
use crate::host::layout::Options;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WayfinderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub scenes: ScenesConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub routes_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EventsConfig {
    pub strict_ordering: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScenesConfig {
    pub widget_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Forwarded to the host as `setDefaultOptions` on launch.
    pub options: Option<toml::Table>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "wayfinder.log";
pub const DEFAULT_ROUTES_FILE: &str = "routes.toml";
pub const DEFAULT_WIDGET_PREFIX: &str = "widget-";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: String,
    pub log_file: PathBuf,
    pub routes_file: PathBuf,
    pub strict_ordering: bool,
    pub widget_prefix: String,
    pub default_options: Options,
}

impl ResolvedConfig {
    pub fn settings(&self) -> Settings {
        Settings {
            widget_prefix: self.widget_prefix.clone(),
            strict_ordering: self.strict_ordering,
            default_options: self.default_options.clone(),
        }
    }
}

/// Values given on the command line. `None` means not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub routes_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Json(e) => write!(f, "route file JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.wayfinder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wayfinder").join("config.toml"))
}

/// Load config from `~/.wayfinder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WayfinderConfig::default()`.
pub fn load_config() -> Result<WayfinderConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(WayfinderConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path, generating a default if missing.
pub fn load_config_from(path: &Path) -> Result<WayfinderConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WayfinderConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WayfinderConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Wayfinder Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"
# log_file = "wayfinder.log"
# routes_file = "routes.toml"        # Or set WAYFINDER_ROUTES env var

# [events]
# strict_ordering = true             # Reject host events delivered out of order

# [scenes]
# widget_prefix = "widget-"          # Component ids never counted as scenes

# [defaults.options]                 # Sent to the host as setDefaultOptions
# topBar = { visible = false }
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

/// Loads route definitions. `.json` files are parsed as JSON, anything
/// else as TOML.
pub fn load_routes(path: &Path) -> Result<RootDef, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let def = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&contents).map_err(ConfigError::Json)?
    } else {
        toml::from_str(&contents).map_err(ConfigError::Parse)?
    };
    info!("Loaded routes from {}", path.display());
    Ok(def)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WayfinderConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("WAYFINDER_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    // Routes: CLI → env → config → default
    let routes_file = cli
        .routes_file
        .clone()
        .or_else(|| std::env::var("WAYFINDER_ROUTES").ok().map(PathBuf::from))
        .or_else(|| config.general.routes_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROUTES_FILE));

    let default_options = config
        .defaults
        .options
        .as_ref()
        .map(table_to_options)
        .unwrap_or_default();

    ResolvedConfig {
        log_level,
        log_file: PathBuf::from(config.general.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE)),
        routes_file,
        strict_ordering: config.events.strict_ordering.unwrap_or(true),
        widget_prefix: config
            .scenes
            .widget_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_WIDGET_PREFIX.to_string()),
        default_options,
    }
}

fn table_to_options(table: &toml::Table) -> Options {
    match serde_json::to_value(table) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => Options::new(),
        Err(e) => {
            warn!("Ignoring default options: {}", e);
            Options::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes::RouteKind;

    #[test]
    fn test_default_config_parses() {
        let config = WayfinderConfig::default();
        assert!(config.general.log_level.is_none());
        assert!(config.defaults.options.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&WayfinderConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(resolved.strict_ordering);
        assert_eq!(resolved.widget_prefix, DEFAULT_WIDGET_PREFIX);
        assert!(resolved.default_options.is_empty());
        assert_eq!(resolved.settings(), Settings::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let toml_str = r#"
[general]
log_file = "/tmp/nav.log"

[events]
strict_ordering = false

[scenes]
widget_prefix = "w:"

[defaults.options]
topBar = { visible = false }
"#;
        let config: WayfinderConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/nav.log"));
        assert!(!resolved.strict_ordering);
        assert_eq!(resolved.widget_prefix, "w:");
        assert_eq!(resolved.default_options["topBar"]["visible"], false);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = WayfinderConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                routes_file: Some("from-config.toml".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            log_level: Some("trace".to_string()),
            routes_file: Some(PathBuf::from("cli.json")),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.log_level, "trace");
        assert_eq!(resolved.routes_file, PathBuf::from("cli.json"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: WayfinderConfig = toml::from_str("[scenes]\nwidget_prefix = \"x-\"\n").unwrap();
        assert_eq!(config.scenes.widget_prefix.as_deref(), Some("x-"));
        assert!(config.events.strict_ordering.is_none());
    }

    #[test]
    fn test_load_routes_picks_format_by_extension() {
        let dir = std::env::temp_dir().join(format!("wayfinder-routes-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("routes.json");
        fs::write(
            &json_path,
            r#"{"routes": [{"key": "main", "type": "stack", "routes": [{"key": "A", "type": "screen"}]}]}"#,
        )
        .unwrap();
        let def = load_routes(&json_path).unwrap();
        assert!(matches!(def.routes[0].kind, RouteKind::Stack(_)));

        let toml_path = dir.join("routes.toml");
        fs::write(&toml_path, "[[routes]]\nkey = \"toast\"\ntype = \"overlay\"\n").unwrap();
        let def = load_routes(&toml_path).unwrap();
        assert!(matches!(def.routes[0].kind, RouteKind::Overlay(_)));

        assert!(matches!(load_routes(&dir.join("missing.toml")), Err(ConfigError::Io(_))));
        fs::remove_dir_all(&dir).unwrap();
    }
}
