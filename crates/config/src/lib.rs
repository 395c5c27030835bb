//! Body catalog models and loaders for the Rendezvous Planner.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// A primary or target body parsed from catalog manifests.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    /// Gravitational parameter (km³/s²).
    pub mu_km3_s2: f64,
    /// Mean body radius (km), used for combined-radius distance clamping.
    pub radius_km: f64,
    /// Default circular parking orbit altitude above the surface (km).
    #[serde(default)]
    pub default_parking_altitude_km: f64,
}

impl BodyConfig {
    /// Radius of the default parking orbit (km).
    pub fn parking_radius_km(&self) -> f64 {
        self.radius_km + self.default_parking_altitude_km
    }
}

/// Errors that can occur while loading catalog files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("body '{name}' is invalid: {reason}")]
    InvalidBody { name: String, reason: String },
}

/// Load body configurations from a TOML file or a directory of TOML files.
///
/// Directory entries are read in sorted order so the catalog is deterministic.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    let bodies = load_records(path)?;
    for body in &bodies {
        validate(body)?;
    }
    Ok(bodies)
}

fn validate(body: &BodyConfig) -> Result<(), ConfigError> {
    if !(body.mu_km3_s2 > 0.0) {
        return Err(ConfigError::InvalidBody {
            name: body.name.clone(),
            reason: format!("mu_km3_s2 must be positive, got {}", body.mu_km3_s2),
        });
    }
    if body.radius_km < 0.0 {
        return Err(ConfigError::InvalidBody {
            name: body.name.clone(),
            reason: format!("radius_km must be non-negative, got {}", body.radius_km),
        });
    }
    Ok(())
}

fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else {
        let contents = std::fs::read_to_string(path)?;
        Ok(vec![toml::from_str(&contents)?])
    }
}

fn read_dir_records(dir: &Path) -> Result<Vec<BodyConfig>, ConfigError> {
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        records.push(toml::from_str(&contents)?);
    }
    Ok(records)
}
