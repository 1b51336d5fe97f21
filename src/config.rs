//! Environment driven settings

use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::error::{Error, Result};

pub const DATA_DIR_VAR: &str = "CARTIQ_DATA_DIR";
pub const BIND_VAR: &str = "CARTIQ_BIND";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND: &str = "0.0.0.0:7878";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding products.json, users.json and activity.json
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
}

impl Config {
    /// Reads `CARTIQ_DATA_DIR` and `CARTIQ_BIND`, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            data_dir: try_load(&lookup, DATA_DIR_VAR, DEFAULT_DATA_DIR)?,
            bind: try_load(&lookup, BIND_VAR, DEFAULT_BIND)?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        Error::InvalidInput(format!("{key}='{raw}': {e}"))
    })
}

#[cfg(test)]
mod config_test {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.bind, "0.0.0.0:7878".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (DATA_DIR_VAR, "/srv/shop"),
            (BIND_VAR, "127.0.0.1:9000"),
        ])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/shop"));
        assert_eq!(config.bind.port(), 9000);
    }

    #[test]
    fn test_bad_bind_address() {
        let result = Config::from_lookup(lookup_from(&[(BIND_VAR, "not-an-address")]));

        match result {
            Err(Error::InvalidInput(msg)) => assert!(msg.starts_with("CARTIQ_BIND='not-an-address'")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
