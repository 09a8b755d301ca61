//! Engine tunables.
//!
//! Every field has a default; a JSON file may override any subset of them.
//! The binary reads the file path from [`CONFIG_ENV_VAR`].

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::explosion::{EXPLOSION_TTL, MAX_LIVE_EXPLOSIONS, SWEEP_INTERVAL};
use crate::exposure::{DEFAULT_EXPOSURE_SEED, DEFAULT_SAMPLE_COUNT, MIN_INFLUENCE_RADIUS_KM};

/// Environment variable holding the path of a JSON config file.
pub const CONFIG_ENV_VAR: &str = "IMPACT_EXPLORER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Points per exposure field.
    pub exposure_samples: usize,
    /// Floor on the exposure influence radius (km).
    pub influence_floor_km: f64,
    /// Seed for the exposure sampler.
    pub exposure_seed: u64,
    pub explosion_ttl_ms: u64,
    pub sweep_interval_ms: u64,
    pub max_live_explosions: usize,
    /// Optional GeoJSON file with country outlines.
    pub boundaries_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exposure_samples: DEFAULT_SAMPLE_COUNT,
            influence_floor_km: MIN_INFLUENCE_RADIUS_KM,
            exposure_seed: DEFAULT_EXPOSURE_SEED,
            explosion_ttl_ms: EXPLOSION_TTL.as_millis() as u64,
            sweep_interval_ms: SWEEP_INTERVAL.as_millis() as u64,
            max_live_explosions: MAX_LIVE_EXPLOSIONS,
            boundaries_path: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], falling back to
    /// defaults when the variable is unset or the file is unusable.
    pub fn from_env_or_default() -> Self {
        let Some(path) = env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded engine config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Using default engine config: {err}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exposure_samples == 0 {
            return Err(ConfigError::Invalid("exposure_samples must be positive"));
        }
        if self.influence_floor_km.is_nan() || self.influence_floor_km <= 0.0 {
            return Err(ConfigError::Invalid("influence_floor_km must be positive"));
        }
        if self.explosion_ttl_ms == 0 || self.sweep_interval_ms == 0 {
            return Err(ConfigError::Invalid("explosion timings must be positive"));
        }
        if self.max_live_explosions == 0 {
            return Err(ConfigError::Invalid("max_live_explosions must be positive"));
        }
        Ok(())
    }

    pub fn explosion_ttl(&self) -> Duration {
        Duration::from_millis(self.explosion_ttl_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}
