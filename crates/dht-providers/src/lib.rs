//! # dht-providers
//!
//! Sensor channel implementations for the DHT server.
//!
//! This crate provides:
//! - [`IioSensor`] - a DHT11/DHT22 read through the Linux IIO sysfs interface
//! - [`SimulatedSensor`] - a software channel for development and demos
//!
//! Both implement [`dht_core::Sensor`] and report failed reads as NaN.

pub mod iio;
pub mod simulated;

pub use iio::{IioSensor, SensorError};
pub use simulated::SimulatedSensor;

use dht_core::{Sensor, SensorSettings};

/// Build one sensor per settings entry, keeping the configured order.
pub fn build_sensors(settings: &[SensorSettings]) -> Vec<Box<dyn Sensor>> {
    settings
        .iter()
        .map(|entry| -> Box<dyn Sensor> {
            match entry {
                SensorSettings::Iio { device } => Box::new(IioSensor::new(device)),
                SensorSettings::Simulated {
                    temperature,
                    humidity,
                    drift,
                } => Box::new(SimulatedSensor::new(*temperature, *humidity).with_drift(*drift)),
            }
        })
        .collect()
}
