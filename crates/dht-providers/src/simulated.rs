//! Simulated sensor channel.
//!
//! Values wander slowly around a base temperature and humidity so a running
//! server shows live-looking data without hardware attached. With zero drift
//! the channel is fully deterministic.

use dht_core::{celsius_to_fahrenheit, Sensor, TemperatureUnit};
use std::sync::atomic::{AtomicU32, Ordering};

/// Reads per full cycle of the simulated variation.
const CYCLE_READS: f32 = 120.0;

#[derive(Debug)]
pub struct SimulatedSensor {
    celsius: f32,
    humidity: f32,
    drift: f32,
    reads: AtomicU32,
}

impl SimulatedSensor {
    /// Create a channel reading `celsius` °C and `humidity` %RH.
    pub fn new(celsius: f32, humidity: f32) -> Self {
        Self {
            celsius,
            humidity,
            drift: 0.0,
            reads: AtomicU32::new(0),
        }
    }

    /// Let values vary by up to `drift` around the base values.
    pub fn with_drift(mut self, drift: f32) -> Self {
        self.drift = drift;
        self
    }

    /// Offset for the next read.
    fn offset(&self) -> f32 {
        if self.drift == 0.0 {
            return 0.0;
        }
        let n = self.reads.fetch_add(1, Ordering::Relaxed) as f32;
        self.drift * (n * std::f32::consts::TAU / CYCLE_READS).sin()
    }
}

impl Sensor for SimulatedSensor {
    fn read_temperature(&self, unit: TemperatureUnit) -> f32 {
        let celsius = self.celsius + self.offset();
        match unit {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    fn read_humidity(&self) -> f32 {
        (self.humidity + self.offset()).clamp(0.0, 100.0)
    }
}
