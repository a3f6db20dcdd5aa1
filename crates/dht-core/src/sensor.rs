//! Sensor capability consumed by the dispatcher and the formatters.
//!
//! A sensor channel is anything that can report a temperature and a relative
//! humidity. Reads are synchronous and may block on a hardware transaction;
//! a failed read is reported as NaN, never as an error.

use tracing::warn;

/// Unit for temperature reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    /// Parse the optional unit path segment (`"f"` or `"c"`).
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "f" => Some(TemperatureUnit::Fahrenheit),
            "c" => Some(TemperatureUnit::Celsius),
            _ => None,
        }
    }

    /// Symbol used in the human readable report.
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }
}

/// A temperature/humidity sensor channel.
///
/// Implementations own any caching or timing state they need; callers only
/// hold shared references.
pub trait Sensor: Send + Sync {
    /// Read the temperature in `unit`, or NaN on a failed read.
    fn read_temperature(&self, unit: TemperatureUnit) -> f32;

    /// Read the relative humidity in percent, or NaN on a failed read.
    fn read_humidity(&self) -> f32;
}

impl<T: Sensor + ?Sized> Sensor for Box<T> {
    fn read_temperature(&self, unit: TemperatureUnit) -> f32 {
        (**self).read_temperature(unit)
    }

    fn read_humidity(&self) -> f32 {
        (**self).read_humidity()
    }
}

impl<T: Sensor + ?Sized> Sensor for &T {
    fn read_temperature(&self, unit: TemperatureUnit) -> f32 {
        (**self).read_temperature(unit)
    }

    fn read_humidity(&self) -> f32 {
        (**self).read_humidity()
    }
}

/// Convert a Celsius temperature to Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Replace a failed (NaN) read with zero.
pub fn or_zero(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Every value of one sensor channel, each failed read already replaced by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub fahrenheit: f32,
    pub celsius: f32,
    pub humidity: f32,
}

impl Reading {
    /// Read all three values from `sensor`. Each field is checked on its own.
    pub fn take<S: Sensor + ?Sized>(index: usize, sensor: &S) -> Self {
        let field = |name: &'static str, value: f32| {
            if value.is_nan() {
                warn!(sensor = index, field = name, "Sensor read failed, reporting 0");
            }
            or_zero(value)
        };

        Self {
            fahrenheit: field(
                "fahrenheit",
                sensor.read_temperature(TemperatureUnit::Fahrenheit),
            ),
            celsius: field("celsius", sensor.read_temperature(TemperatureUnit::Celsius)),
            humidity: field("humidity", sensor.read_humidity()),
        }
    }
}
