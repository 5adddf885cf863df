//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `FLAPPY_TICK_MS` | 16 | Fixed frame interval (1..=1000) |
//! | `FLAPPY_KEY_RELEASE_MS` | 200 | Held-key timeout for terminals without release events |
//! | `FLAPPY_STATIC_RENDER_MS` | 250 | Redraw interval for frames that cannot change |
//! | `FLAPPY_LOG_PATH` | unset | Log file; logging is disabled when unset |
//!
//! The log level follows `RUST_LOG` (default `info`).

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::types::TICK_MS;

const DEFAULT_STATIC_RENDER_MS: u64 = 250;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid number")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}={value} is out of range ({min}..={max})")]
    OutOfRange {
        var: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub tick_ms: u32,
    pub key_release_timeout_ms: u32,
    pub static_render_ms: u64,
    pub log_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            static_render_ms: DEFAULT_STATIC_RENDER_MS,
            log_path: None,
        }
    }
}

impl RunConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tick_ms = parse_u64(&lookup, "FLAPPY_TICK_MS", 1, 1000)?
            .map_or(defaults.tick_ms, |v| v as u32);
        let key_release_timeout_ms = parse_u64(&lookup, "FLAPPY_KEY_RELEASE_MS", 0, 10_000)?
            .map_or(defaults.key_release_timeout_ms, |v| v as u32);
        let static_render_ms = parse_u64(&lookup, "FLAPPY_STATIC_RENDER_MS", 0, 60_000)?
            .unwrap_or(defaults.static_render_ms);

        let log_path = lookup("FLAPPY_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            tick_ms,
            key_release_timeout_ms,
            static_render_ms,
            log_path,
        })
    }
}

/// Unset or blank variables yield `Ok(None)`.
fn parse_u64<F>(
    lookup: &F,
    var: &'static str,
    min: u64,
    max: u64,
) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: u64 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            var,
            value,
            min,
            max,
        });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = RunConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.tick_ms, TICK_MS);
        assert!(cfg.log_path.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let cfg = RunConfig::from_lookup(lookup(&[
            ("FLAPPY_TICK_MS", "33"),
            ("FLAPPY_KEY_RELEASE_MS", " 500 "),
            ("FLAPPY_STATIC_RENDER_MS", "1000"),
            ("FLAPPY_LOG_PATH", "/tmp/flappy.log"),
        ]))
        .unwrap();
        assert_eq!(cfg.tick_ms, 33);
        assert_eq!(cfg.key_release_timeout_ms, 500);
        assert_eq!(cfg.static_render_ms, 1000);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/flappy.log")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = RunConfig::from_lookup(lookup(&[
            ("FLAPPY_TICK_MS", "  "),
            ("FLAPPY_LOG_PATH", ""),
        ]))
        .unwrap();
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        let err = RunConfig::from_lookup(lookup(&[("FLAPPY_TICK_MS", "fast")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "FLAPPY_TICK_MS",
                value: "fast".to_string()
            }
        );

        let err = RunConfig::from_lookup(lookup(&[("FLAPPY_TICK_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: 0, .. }));
        assert_eq!(
            err.to_string(),
            "FLAPPY_TICK_MS=0 is out of range (1..=1000)"
        );
    }
}
