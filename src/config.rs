//! Configuration loading and management

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::gate::names;

/// How long the copy acknowledgement stays visible
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2000);

/// Which behavior set the inspector runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Display only, 500 character overlay
    Extractor,
    /// Display and click-to-copy, 600 character overlay
    #[default]
    Copier,
}

impl Variant {
    /// Maximum overlay length in characters
    pub fn max_chars(&self) -> usize {
        match self {
            Variant::Extractor => 500,
            Variant::Copier => 600,
        }
    }

    /// Whether clicking the overlay copies its text
    pub fn copies_on_click(&self) -> bool {
        matches!(self, Variant::Copier)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Extractor => write!(f, "extractor"),
            Variant::Copier => write!(f, "copier"),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extractor" => Ok(Variant::Extractor),
            "copier" => Ok(Variant::Copier),
            other => Err(ConfigError::InvalidValue {
                key: "HOVER_INSPECTOR_VARIANT",
                value: other.to_string(),
            }),
        }
    }
}

/// Errors while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOME is not set and HOVER_INSPECTOR_SOCKET was not given")]
    MissingHome,

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Unix domain socket for IPC
    pub socket_path: PathBuf,

    /// Directory for runtime data
    pub data_dir: PathBuf,

    /// Behavior set
    pub variant: Variant,

    /// DOM key name of the primary modifier
    pub primary_key: String,

    /// Clear modifier state when the host window loses focus
    pub release_on_blur: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup("HOME") {
            Some(home) => PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("hover-inspector"),
            None => std::env::temp_dir().join("hover-inspector"),
        };

        let socket_path = match lookup("HOVER_INSPECTOR_SOCKET") {
            Some(path) => PathBuf::from(path),
            None if lookup("HOME").is_some() => data_dir.join("inspector.sock"),
            None => return Err(ConfigError::MissingHome),
        };

        let variant = lookup("HOVER_INSPECTOR_VARIANT")
            .map(|v| v.parse::<Variant>())
            .transpose()?
            .unwrap_or_default();

        let primary_key = lookup("HOVER_INSPECTOR_PRIMARY_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| names::META.to_string());

        let release_on_blur = match lookup("HOVER_INSPECTOR_RELEASE_ON_BLUR") {
            Some(value) => parse_bool("HOVER_INSPECTOR_RELEASE_ON_BLUR", &value)?,
            None => true,
        };

        Ok(Self {
            socket_path,
            data_dir,
            variant,
            primary_key,
            release_on_blur,
        })
    }

    /// Ensure data directory exists
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("HOME", "/home/ada")])).unwrap();
        assert_eq!(
            config.socket_path,
            PathBuf::from("/home/ada/.local/share/hover-inspector/inspector.sock")
        );
        assert_eq!(config.variant, Variant::Copier);
        assert_eq!(config.primary_key, "Meta");
        assert!(config.release_on_blur);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOVER_INSPECTOR_SOCKET", "/tmp/hi.sock"),
            ("HOVER_INSPECTOR_VARIANT", "Extractor"),
            ("HOVER_INSPECTOR_PRIMARY_KEY", "Control"),
            ("HOVER_INSPECTOR_RELEASE_ON_BLUR", "off"),
        ]))
        .unwrap();
        assert_eq!(config.socket_path, PathBuf::from("/tmp/hi.sock"));
        assert_eq!(config.variant, Variant::Extractor);
        assert_eq!(config.primary_key, "Control");
        assert!(!config.release_on_blur);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("HOME", "/home/ada"),
            ("HOVER_INSPECTOR_VARIANT", "inspector"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = Config::from_lookup(lookup(&[
            ("HOME", "/home/ada"),
            ("HOVER_INSPECTOR_RELEASE_ON_BLUR", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_home_needs_socket() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::MissingHome)
        ));
        assert!(Config::from_lookup(lookup(&[("HOVER_INSPECTOR_SOCKET", "/tmp/x.sock")])).is_ok());
    }

    #[test]
    fn test_variant_limits() {
        assert_eq!(Variant::Extractor.max_chars(), 500);
        assert_eq!(Variant::Copier.max_chars(), 600);
        assert!(!Variant::Extractor.copies_on_click());
        assert!(Variant::Copier.copies_on_click());
    }
}
