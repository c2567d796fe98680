//! Persisted client configuration
//!
//! A small JSON file holding where the service lives and the last
//! username, so a restart drops the user back into their gallery. The
//! file lives in the platform config directory:
//! - Linux: ~/.config/photo-forge/config.json
//! - macOS: ~/Library/Application Support/photo-forge/config.json
//! - Windows: %APPDATA%\photo-forge\config.json
//!
//! Loading is never fatal; anything unreadable falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the image-processing service.
    pub server_url: String,
    /// Last username a submission succeeded with.
    pub username: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server_url: String::from("http://127.0.0.1:5000"),
            username: String::new(),
        }
    }
}

impl AppConfig {
    /// Get the path where the config file should be stored
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(|| dirs::home_dir())
            .expect("Could not determine user config directory");

        path.push("photo-forge");
        path.push("config.json");
        path
    }

    /// Load the saved configuration, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::config_path();

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    println!("📁 Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    eprintln!("⚠️  Ignoring malformed config file: {}", e);
                    AppConfig::default()
                }
            },
            // Most commonly the file just doesn't exist yet.
            Err(_) => AppConfig::default(),
        }
    }

    /// Persist the configuration. Best effort; failures are logged and
    /// never interrupt the application.
    pub fn save(&self) {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("⚠️  Could not create config directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    eprintln!("⚠️  Could not save configuration: {}", e);
                }
            }
            Err(e) => eprintln!("⚠️  Could not serialize configuration: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_service() {
        let config = AppConfig::default();
        assert_eq!(config.server_url, "http://127.0.0.1:5000");
        assert!(config.username.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig {
            server_url: String::from("http://images.example.com"),
            username: String::from("alice"),
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
