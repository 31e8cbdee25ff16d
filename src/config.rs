//! Runtime configuration, resolved once at process startup.
//!
//! Values come from the environment (a `.env` file is honoured by `main`).
//! Handlers never read the environment themselves; they receive an
//! `AppConfig` through the router state.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "BloodSense";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 16 MiB upload ceiling.
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;
pub const DEFAULT_RETENTION_HOURS: u64 = 24;
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";
pub const DEFAULT_TEMP_FOLDER: &str = "temp";
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

const SECS_PER_HOUR: u64 = 60 * 60;
const PLACEHOLDER_SECRET_KEY: &str = "your-secret-key-here";

/// Standard Linux install location, preferred over a `PATH` lookup when present.
const SYSTEM_TESSERACT: &str = "/usr/bin/tesseract";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Core configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub max_content_length: usize,
    pub allowed_extensions: HashSet<String>,
    pub retention_hours: u64,
    pub secret_key: String,
    pub tesseract_path: String,
    pub ocr_language: String,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_ADDR.parse().unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 5000))),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_FOLDER),
            temp_dir: PathBuf::from(DEFAULT_TEMP_FOLDER),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            retention_hours: DEFAULT_RETENTION_HOURS,
            secret_key: PLACEHOLDER_SECRET_KEY.to_string(),
            tesseract_path: default_tesseract_path(),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            log_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset keys keep
    /// their defaults; set-but-invalid keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("BLOODSENSE_ADDR") {
            config.bind_addr = addr.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BLOODSENSE_ADDR",
                value: addr.clone(),
            })?;
        }
        if let Some(dir) = lookup("UPLOAD_FOLDER") {
            config.upload_dir = non_empty_path("UPLOAD_FOLDER", &dir)?;
        }
        if let Some(dir) = lookup("TEMP_FOLDER") {
            config.temp_dir = non_empty_path("TEMP_FOLDER", &dir)?;
        }
        if let Some(len) = lookup("MAX_CONTENT_LENGTH") {
            config.max_content_length = parse_positive("MAX_CONTENT_LENGTH", &len)?;
        }
        if let Some(exts) = lookup("ALLOWED_EXTENSIONS") {
            config.allowed_extensions = parse_extensions(&exts)?;
        }
        if let Some(hours) = lookup("FILE_CLEANUP_HOURS") {
            let parsed: u64 = parse_positive("FILE_CLEANUP_HOURS", &hours)?;
            if parsed.checked_mul(SECS_PER_HOUR).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: "FILE_CLEANUP_HOURS",
                    value: hours,
                });
            }
            config.retention_hours = parsed;
        }
        if let Some(key) = lookup("SECRET_KEY") {
            if key.trim().is_empty() {
                return Err(ConfigError::Empty("SECRET_KEY"));
            }
            config.secret_key = key;
        }
        if let Some(cmd) = lookup("TESSERACT_CMD") {
            if cmd.trim().is_empty() {
                return Err(ConfigError::Empty("TESSERACT_CMD"));
            }
            config.tesseract_path = cmd;
        }
        if let Some(lang) = lookup("OCR_LANGUAGE") {
            if lang.trim().is_empty() {
                return Err(ConfigError::Empty("OCR_LANGUAGE"));
            }
            config.ocr_language = lang;
        }
        if let Some(dir) = lookup("LOG_DIR") {
            config.log_dir = non_empty_path("LOG_DIR", &dir)?;
        }

        Ok(config)
    }

    pub fn retention_window(&self) -> Duration {
        Duration::from_secs(self.retention_hours.saturating_mul(SECS_PER_HOUR))
    }

    pub fn uses_placeholder_secret(&self) -> bool {
        self.secret_key == PLACEHOLDER_SECRET_KEY
    }

    /// Human-readable size limit used in the 413 message.
    pub fn max_content_length_mb(&self) -> usize {
        self.max_content_length / (1024 * 1024)
    }

    /// Create the upload and report directories if they are missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.temp_dir)
    }
}

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "bloodsense=info"
}

/// Tesseract binary to invoke: the system install if it exists, otherwise
/// whatever `tesseract` resolves to on `PATH`.
pub fn default_tesseract_path() -> String {
    if Path::new(SYSTEM_TESSERACT).exists() {
        SYSTEM_TESSERACT.to_string()
    } else {
        "tesseract".to_string()
    }
}

fn non_empty_path(key: &'static str, value: &str) -> Result<PathBuf, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty(key));
    }
    Ok(PathBuf::from(value))
}

fn parse_positive<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_extensions(value: &str) -> Result<HashSet<String>, ConfigError> {
    let exts: HashSet<String> = value
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();
    if exts.is_empty() {
        return Err(ConfigError::Empty("ALLOWED_EXTENSIONS"));
    }
    Ok(exts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.max_content_length, 16 * 1024 * 1024);
        assert_eq!(config.retention_hours, 24);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.temp_dir, PathBuf::from("temp"));
        assert_eq!(config.allowed_extensions.len(), 3);
        assert!(config.allowed_extensions.contains("jpeg"));
        assert!(config.uses_placeholder_secret());
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BLOODSENSE_ADDR", "0.0.0.0:8080"),
            ("UPLOAD_FOLDER", "/srv/uploads"),
            ("MAX_CONTENT_LENGTH", "1048576"),
            ("ALLOWED_EXTENSIONS", "PNG, .jpg"),
            ("FILE_CLEANUP_HOURS", "6"),
            ("SECRET_KEY", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.upload_dir, PathBuf::from("/srv/uploads"));
        assert_eq!(config.max_content_length_mb(), 1);
        assert_eq!(
            config.allowed_extensions,
            ["png", "jpg"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(config.retention_window(), Duration::from_secs(6 * 3600));
        assert!(!config.uses_placeholder_secret());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[("BLOODSENSE_ADDR", "nope")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("FILE_CLEANUP_HOURS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("MAX_CONTENT_LENGTH", "-5")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("ALLOWED_EXTENSIONS", " , ")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("SECRET_KEY", "  ")])).is_err());
    }

    #[test]
    fn retention_hours_that_overflow_seconds_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "FILE_CLEANUP_HOURS",
            "18446744073709551615",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "FILE_CLEANUP_HOURS", .. }
        ));

        let config = AppConfig {
            retention_hours: u64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(config.retention_window(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn ensure_dirs_creates_both_folders() {
        let root = tempfile::tempdir().unwrap();
        let config = AppConfig {
            upload_dir: root.path().join("uploads"),
            temp_dir: root.path().join("temp"),
            ..AppConfig::default()
        };
        config.ensure_dirs().unwrap();
        assert!(config.upload_dir.is_dir());
        assert!(config.temp_dir.is_dir());
    }

    #[test]
    fn app_name_is_bloodsense() {
        assert_eq!(APP_NAME, "BloodSense");
    }
}
