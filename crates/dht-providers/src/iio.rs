//! DHT sensors exposed by the Linux IIO subsystem.
//!
//! With the `dht11` kernel driver bound (device tree overlay `dht11` on a
//! Raspberry Pi, for example) each sensor shows up as
//! `/sys/bus/iio/devices/iio:deviceN` with two attributes:
//!
//! - `in_temp_input` - temperature in milli-degrees Celsius
//! - `in_humidityrelative_input` - relative humidity in milli-percent
//!
//! Reading an attribute triggers a blocking transaction on the data pin. The
//! driver frequently fails with `EIO` on a bad checksum; those reads come back
//! as NaN.

use dht_core::{celsius_to_fahrenheit, Sensor, TemperatureUnit};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

const TEMPERATURE_ATTRIBUTE: &str = "in_temp_input";
const HUMIDITY_ATTRIBUTE: &str = "in_humidityrelative_input";

/// Why an IIO attribute could not be read.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected value {value:?} in {path}")]
    Parse { path: PathBuf, value: String },
}

/// A DHT sensor read through sysfs.
#[derive(Debug, Clone)]
pub struct IioSensor {
    device: PathBuf,
}

impl IioSensor {
    /// Create a sensor for the IIO device directory `device`.
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
        }
    }

    /// Temperature in degrees Celsius.
    pub fn celsius(&self) -> Result<f32, SensorError> {
        self.read_milli(TEMPERATURE_ATTRIBUTE)
    }

    /// Relative humidity in percent.
    pub fn humidity(&self) -> Result<f32, SensorError> {
        self.read_milli(HUMIDITY_ATTRIBUTE)
    }

    fn read_milli(&self, attribute: &str) -> Result<f32, SensorError> {
        let path = self.device.join(attribute);
        let text = std::fs::read_to_string(&path).map_err(|source| SensorError::Io {
            path: path.clone(),
            source,
        })?;

        let milli: i32 = text.trim().parse().map_err(|_| SensorError::Parse {
            path: path.clone(),
            value: text.trim().to_string(),
        })?;

        Ok(milli as f32 / 1000.0)
    }
}

impl Sensor for IioSensor {
    fn read_temperature(&self, unit: TemperatureUnit) -> f32 {
        match self.celsius() {
            Ok(celsius) => match unit {
                TemperatureUnit::Celsius => celsius,
                TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
            },
            Err(e) => {
                debug!("Temperature read failed: {}", e);
                f32::NAN
            }
        }
    }

    fn read_humidity(&self) -> f32 {
        self.humidity().unwrap_or_else(|e| {
            debug!("Humidity read failed: {}", e);
            f32::NAN
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create a fake IIO device directory unique to this test.
    fn fake_device(name: &str, temperature: &str, humidity: Option<&str>) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dht-iio-{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(TEMPERATURE_ATTRIBUTE), temperature).unwrap();
        match humidity {
            Some(value) => fs::write(dir.join(HUMIDITY_ATTRIBUTE), value).unwrap(),
            None => {
                let _ = fs::remove_file(dir.join(HUMIDITY_ATTRIBUTE));
            }
        }
        dir
    }

    #[test]
    fn test_reads_milli_units() {
        let dir = fake_device("milli", "22500\n", Some("45300\n"));
        let sensor = IioSensor::new(&dir);

        assert_eq!(sensor.read_temperature(TemperatureUnit::Celsius), 22.5);
        assert_eq!(sensor.read_temperature(TemperatureUnit::Fahrenheit), 72.5);
        assert_eq!(sensor.read_humidity(), 45.3);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_negative_temperature() {
        let dir = fake_device("negative", "-4000\n", Some("80000\n"));
        let sensor = IioSensor::new(&dir);

        assert_eq!(sensor.read_temperature(TemperatureUnit::Celsius), -4.0);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_attribute_is_nan() {
        let dir = fake_device("missing", "21000\n", None);
        let sensor = IioSensor::new(&dir);

        assert_eq!(sensor.read_temperature(TemperatureUnit::Celsius), 21.0);
        assert!(sensor.read_humidity().is_nan());
        assert!(matches!(sensor.humidity(), Err(SensorError::Io { .. })));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_garbage_value_is_nan() {
        let dir = fake_device("garbage", "not a number\n", Some("45000\n"));
        let sensor = IioSensor::new(&dir);

        assert!(sensor.read_temperature(TemperatureUnit::Fahrenheit).is_nan());
        assert!(matches!(sensor.celsius(), Err(SensorError::Parse { .. })));

        fs::remove_dir_all(dir).ok();
    }
}
