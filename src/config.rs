use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_WOL_PORT: u16 = 9;
pub const DEFAULT_BROADCAST_ADDRESS: &str = "255.255.255.255";
pub const DEFAULT_DELAY_RANGE: (f64, f64) = (0.0, 1.0);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run configuration as read from a JSON file. Every field except the
/// address list falls back to the module-level defaults.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub mac_addresses: Vec<String>,
    #[serde(default = "default_port")]
    pub wol_port: u16,
    #[serde(default = "default_broadcast")]
    pub broadcast_address: String,
    #[serde(default = "default_delay_range")]
    pub delay_range: (f64, f64),
}

fn default_port() -> u16 {
    DEFAULT_WOL_PORT
}

fn default_broadcast() -> String {
    DEFAULT_BROADCAST_ADDRESS.to_string()
}

fn default_delay_range() -> (f64, f64) {
    DEFAULT_DELAY_RANGE
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn test_full_config() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "mac_addresses": ["4c:e9:e4:55:91:bd", "aaaa-bbbb-ccdd"],
                "wol_port": 7,
                "broadcast_address": "192.168.1.255",
                "delay_range": [1.0, 3.0]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.mac_addresses.len(), 2);
        assert_eq!(cfg.wol_port, 7);
        assert_eq!(cfg.broadcast_address, "192.168.1.255");
        assert_eq!(cfg.delay_range, (1.0, 3.0));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let cfg: Config =
            serde_json::from_str(r#"{"mac_addresses": ["a1b2c3d4e5f6"]}"#).unwrap();
        assert_eq!(cfg.wol_port, DEFAULT_WOL_PORT);
        assert_eq!(cfg.broadcast_address, DEFAULT_BROADCAST_ADDRESS);
        assert_eq!(cfg.delay_range, DEFAULT_DELAY_RANGE);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<Config>(
            r#"{"mac_addresses": [], "wol_password": "hunter2"}"#,
        );
        assert!(result.is_err());
    }
}
