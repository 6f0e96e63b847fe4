//! Daemon configuration, read from `STOWAGE_*` environment variables

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use stowage_core::constants::{DEFAULT_EVICTION_IDLE, DEFAULT_EVICTION_INTERVAL};
use stowage_core::port::EvictionConfig;
use stowage_infra_memory::MemoryStorageConfig;

pub const ENV_LOG_FORMAT: &str = "STOWAGE_LOG_FORMAT";
pub const ENV_LOG_DIR: &str = "STOWAGE_LOG_DIR";
pub const ENV_MAX_QUEUE_DEPTH: &str = "STOWAGE_MAX_QUEUE_DEPTH";
pub const ENV_ID_FORMAT: &str = "STOWAGE_ID_FORMAT";
pub const ENV_EVICT_INTERVAL_SECS: &str = "STOWAGE_EVICT_INTERVAL_SECS";
pub const ENV_EVICT_IDLE_SECS: &str = "STOWAGE_EVICT_IDLE_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => bail!("unknown log format '{}' (expected pretty or json)", other),
        }
    }
}

/// Message id scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFormat {
    Uuid,
    Sequence,
}

impl FromStr for IdFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdFormat::Uuid),
            "sequence" => Ok(IdFormat::Sequence),
            other => bail!("unknown id format '{}' (expected uuid or sequence)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
    pub id_format: IdFormat,
    pub storage: MemoryStorageConfig,
    pub eviction: EvictionConfig,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (tests pass a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_format = parse_or(&lookup, ENV_LOG_FORMAT, LogFormat::Pretty)?;
        let id_format = parse_or(&lookup, ENV_ID_FORMAT, IdFormat::Uuid)?;

        let log_dir = lookup(ENV_LOG_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(|dir| PathBuf::from(shellexpand::tilde(&dir).into_owned()));

        // 0 means unbounded, same as unset
        let max_depth = parse_or(&lookup, ENV_MAX_QUEUE_DEPTH, 0usize)?;
        let storage = MemoryStorageConfig {
            max_depth: (max_depth > 0).then_some(max_depth),
        };

        let interval_secs = parse_or(
            &lookup,
            ENV_EVICT_INTERVAL_SECS,
            DEFAULT_EVICTION_INTERVAL.as_secs(),
        )?;
        if interval_secs == 0 {
            bail!("{} must be greater than 0", ENV_EVICT_INTERVAL_SECS);
        }
        let idle_secs = parse_or(&lookup, ENV_EVICT_IDLE_SECS, DEFAULT_EVICTION_IDLE.as_secs())?;

        Ok(Self {
            log_format,
            log_dir,
            id_format,
            storage,
            eviction: EvictionConfig {
                interval: Duration::from_secs(interval_secs),
                idle_for: Duration::from_secs(idle_secs),
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        _ => Ok(default),
    }
}
