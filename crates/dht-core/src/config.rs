//! Server settings.
//!
//! Settings are plain serde types so every platform can load them its own
//! way: a JSON file on Linux, compiled-in defaults on a microcontroller.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of sensor channels in the default settings.
pub const DEFAULT_SENSOR_COUNT: usize = 6;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings are not valid JSON for [`ServerSettings`].
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The settings name no sensor at all.
    #[error("no sensors configured")]
    NoSensors,
}

/// Endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Answer failed dispatches with `400` and unknown pages with `404`
    /// instead of the lenient `200 OK`.
    #[serde(default)]
    pub strict_status: bool,

    /// Sensor channels in index order.
    #[serde(default = "default_sensors")]
    pub sensors: Vec<SensorSettings>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            strict_status: false,
            sensors: default_sensors(),
        }
    }
}

impl ServerSettings {
    /// Parse settings from a JSON document. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: ServerSettings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.sensors.is_empty() {
            return Err(SettingsError::NoSensors);
        }
        Ok(())
    }
}

/// How one sensor channel is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SensorSettings {
    /// A DHT11/DHT22 exposed by the Linux IIO subsystem,
    /// e.g. `/sys/bus/iio/devices/iio:device0`.
    Iio { device: PathBuf },

    /// A simulated channel around fixed base values.
    Simulated {
        /// Base temperature in °C.
        temperature: f32,
        /// Base relative humidity in %.
        humidity: f32,
        /// Amplitude of the slow variation around the base values.
        #[serde(default)]
        drift: f32,
    },
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_sensors() -> Vec<SensorSettings> {
    (0..DEFAULT_SENSOR_COUNT)
        .map(|n| SensorSettings::Simulated {
            temperature: 21.0 + n as f32 * 0.5,
            humidity: 45.0 + n as f32,
            drift: 0.5,
        })
        .collect()
}
