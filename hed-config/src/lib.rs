//! Shared configuration loader for the hed toolchain.
//!
//! `defaults/hed.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`HedConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use hed_parser::hosts::synthesis::SynthesisOptions;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/hed.default.toml");

/// Top-level configuration consumed by hed applications.
#[derive(Debug, Clone, Deserialize)]
pub struct HedConfig {
    #[serde(default)]
    pub hosts: HostsConfig,
    pub format: FormatConfig,
    pub output: OutputConfig,
}

/// Where the hosts file lives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostsConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Mirrors the knobs exposed by the line synthesizer.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    pub hosts_per_line: usize,
}

/// Controls structured CLI output.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl HedConfig {
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions::new(self.format.hosts_per_line)
    }

    /// Configured hosts file, or the platform default.
    pub fn hosts_path(&self) -> PathBuf {
        self.hosts
            .path
            .clone()
            .unwrap_or_else(default_hosts_path)
    }
}

/// The operating system's hosts file.
pub fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Per-user configuration file: `$XDG_CONFIG_HOME/hed/config.toml`, falling back to
/// `$HOME/.config/hed/config.toml`, then `%APPDATA%\\hed\\config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    user_config_path_from(|key| std::env::var_os(key))
}

fn user_config_path_from(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let non_empty = |key: &str| var(key).filter(|value| !value.is_empty());
    non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config")))
        .or_else(|| non_empty("APPDATA").map(PathBuf::from))
        .map(|dir| dir.join("hed").join("config.toml"))
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<HedConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<HedConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.format.hosts_per_line, 10);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert!(config.hosts.path.is_none());
        assert_eq!(config.hosts_path(), default_hosts_path());
        assert_eq!(config.synthesis_options(), SynthesisOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .set_override("format.hosts_per_line", 3i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert_eq!(config.synthesis_options().hosts_per_line, 3);
    }

    #[test]
    fn layers_user_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("hed.toml");
        let mut file = std::fs::File::create(&path).expect("config file");
        writeln!(file, "[hosts]\npath = \"/tmp/custom-hosts\"").expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(config.hosts_path(), PathBuf::from("/tmp/custom-hosts"));
        assert_eq!(config.format.hosts_per_line, 10);
    }

    #[test]
    fn user_config_path_prefers_xdg() {
        let env = |key: &str| match key {
            "XDG_CONFIG_HOME" => Some(OsString::from("/xdg")),
            "HOME" => Some(OsString::from("/home/me")),
            _ => None,
        };
        assert_eq!(
            user_config_path_from(env),
            Some(PathBuf::from("/xdg/hed/config.toml"))
        );
    }

    #[test]
    fn user_config_path_falls_back_to_home() {
        let env = |key: &str| match key {
            "XDG_CONFIG_HOME" => Some(OsString::new()),
            "HOME" => Some(OsString::from("/home/me")),
            _ => None,
        };
        assert_eq!(
            user_config_path_from(env),
            Some(PathBuf::from("/home/me/.config/hed/config.toml"))
        );
        assert_eq!(user_config_path_from(|_| None), None);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/hed.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.format.hosts_per_line, 10);
    }
}
