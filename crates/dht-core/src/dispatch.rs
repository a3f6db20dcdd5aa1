//! Resolution of path segments to a sensor read.
//!
//! A sensor path has the shape `sensorN/operation[/unit]`:
//!
//! - `sensorN` selects channel `N` out of the configured sensors
//! - `operation` is `temp` or `humidity`
//! - `unit` is `f` (default) or `c` and only matters for `temp`
//!
//! Validation runs in a fixed order (segment count, unit, sensor, operation)
//! and the first failure is the one reported.

use crate::path::PathSegments;
use crate::sensor::{Sensor, TemperatureUnit};
use thiserror::Error;

/// Prefix of the sensor selection segment.
pub const SENSOR_PREFIX: &str = "sensor";

/// Why a sensor path could not be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The unit segment is present but is neither `c` nor `f`.
    #[error("invalid unit option, expected \"c\" or \"f\"")]
    InvalidOption,

    /// The first segment does not name a configured sensor.
    #[error("unknown sensor")]
    InvalidSensor,

    /// The operation segment is neither `temp` nor `humidity`.
    #[error("invalid operation, expected \"temp\" or \"humidity\"")]
    InvalidOperation,

    /// Fewer than two segments (sensor and operation) were given.
    #[error("missing sensor or operation")]
    MissingParameter,
}

/// A read to perform on a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Temperature(TemperatureUnit),
    Humidity,
}

impl Operation {
    /// Parse the operation segment. The unit is only kept for temperature.
    pub fn from_segment(segment: &str, unit: TemperatureUnit) -> Option<Self> {
        match segment {
            "temp" => Some(Operation::Temperature(unit)),
            "humidity" => Some(Operation::Humidity),
            _ => None,
        }
    }

    /// Perform the read.
    pub fn read<S: Sensor + ?Sized>(self, sensor: &S) -> f32 {
        match self {
            Operation::Temperature(unit) => sensor.read_temperature(unit),
            Operation::Humidity => sensor.read_humidity(),
        }
    }
}

/// Parse a `sensorN` segment into the index `N`.
///
/// `N` must be a plain decimal number (no sign, no leading zeros) below
/// `sensor_count`.
pub fn parse_sensor_index(segment: &str, sensor_count: usize) -> Option<usize> {
    let digits = segment.strip_prefix(SENSOR_PREFIX)?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    let index: usize = digits.parse().ok()?;
    (index < sensor_count).then_some(index)
}

/// A validated sensor path: which channel to read and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorRequest {
    pub index: usize,
    pub operation: Operation,
}

impl SensorRequest {
    /// Validate path segments against `sensor_count` configured channels.
    pub fn parse<const M: usize>(
        segments: &PathSegments<'_, M>,
        sensor_count: usize,
    ) -> Result<Self, DispatchError> {
        let [sensor, operation, rest @ ..] = segments.as_slice() else {
            return Err(DispatchError::MissingParameter);
        };

        let unit = match rest.first() {
            Some(option) => {
                TemperatureUnit::from_segment(option).ok_or(DispatchError::InvalidOption)?
            }
            None => TemperatureUnit::default(),
        };

        let index =
            parse_sensor_index(sensor, sensor_count).ok_or(DispatchError::InvalidSensor)?;

        let operation =
            Operation::from_segment(operation, unit).ok_or(DispatchError::InvalidOperation)?;

        Ok(Self { index, operation })
    }
}

/// Resolve `segments` to a sensor read and perform it.
///
/// No sensor is touched when validation fails. A failed hardware read comes
/// back as NaN; turning that into a wire value is up to the caller.
pub fn dispatch<S: Sensor, const M: usize>(
    segments: &PathSegments<'_, M>,
    sensors: &[S],
) -> Result<f32, DispatchError> {
    let request = SensorRequest::parse(segments, sensors.len())?;
    let sensor = sensors
        .get(request.index)
        .ok_or(DispatchError::InvalidSensor)?;
    Ok(request.operation.read(sensor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::fixtures::{six_sensors, FixedSensor};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn segments(line: &str) -> PathSegments<'_> {
        PathSegments::tokenize(line)
    }

    /// Sensors where channel 0 reads 72.0°F / 22.2°C and channel 3 reads 45.5 %RH.
    fn scenario_sensors() -> Vec<FixedSensor> {
        let mut sensors = six_sensors();
        sensors[0] = FixedSensor::new(72.0, 22.2, 50.0);
        sensors[3] = FixedSensor::new(68.0, 20.0, 45.5);
        sensors
    }

    #[test]
    fn test_temperature_defaults_to_fahrenheit() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor0/temp HTTP/1.1"), &sensors);
        assert_eq!(value, Ok(72.0));
    }

    #[test]
    fn test_temperature_celsius() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor0/temp/c HTTP/1.1"), &sensors);
        assert_eq!(value, Ok(22.2));
    }

    #[test]
    fn test_temperature_explicit_fahrenheit() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor0/temp/f HTTP/1.1"), &sensors);
        assert_eq!(value, Ok(72.0));
    }

    #[test]
    fn test_humidity() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor3/humidity HTTP/1.1"), &sensors);
        assert_eq!(value, Ok(45.5));
    }

    #[test]
    fn test_humidity_ignores_unit() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor3/humidity/c HTTP/1.1"), &sensors);
        assert_eq!(value, Ok(45.5));
    }

    #[test]
    fn test_unknown_sensor() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor9/temp HTTP/1.1"), &sensors);
        assert_eq!(value, Err(DispatchError::InvalidSensor));
    }

    #[test]
    fn test_unknown_operation() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor1/speed HTTP/1.1"), &sensors);
        assert_eq!(value, Err(DispatchError::InvalidOperation));
    }

    #[test]
    fn test_unknown_unit() {
        let sensors = scenario_sensors();
        let value = dispatch(&segments("GET /sensor1/temp/k HTTP/1.1"), &sensors);
        assert_eq!(value, Err(DispatchError::InvalidOption));
    }

    #[test]
    fn test_missing_parameter() {
        let sensors = scenario_sensors();
        assert_eq!(
            dispatch(&segments("GET /sensor1 HTTP/1.1"), &sensors),
            Err(DispatchError::MissingParameter)
        );
        assert_eq!(
            dispatch(&segments("GET / HTTP/1.1"), &sensors),
            Err(DispatchError::MissingParameter)
        );
    }

    #[test]
    fn test_first_error_wins() {
        let sensors = scenario_sensors();
        // Bad unit is checked before the sensor name.
        assert_eq!(
            dispatch(&segments("GET /sensor9/speed/k HTTP/1.1"), &sensors),
            Err(DispatchError::InvalidOption)
        );
        // Bad sensor is reported even when the operation is also wrong.
        assert_eq!(
            dispatch(&segments("GET /sensor9/speed HTTP/1.1"), &sensors),
            Err(DispatchError::InvalidSensor)
        );
    }

    #[test]
    fn test_sensor_count_is_configurable() {
        let sensors = vec![FixedSensor::new(1.0, 2.0, 3.0); 12];
        assert_eq!(
            dispatch(&segments("GET /sensor11/humidity HTTP/1.1"), &sensors),
            Ok(3.0)
        );
        assert_eq!(
            dispatch(&segments("GET /sensor12/humidity HTTP/1.1"), &sensors),
            Err(DispatchError::InvalidSensor)
        );

        let none: Vec<FixedSensor> = Vec::new();
        assert_eq!(
            dispatch(&segments("GET /sensor0/temp HTTP/1.1"), &none),
            Err(DispatchError::InvalidSensor)
        );
    }

    #[test]
    fn test_parse_sensor_index() {
        assert_eq!(parse_sensor_index("sensor0", 6), Some(0));
        assert_eq!(parse_sensor_index("sensor5", 6), Some(5));
        assert_eq!(parse_sensor_index("sensor6", 6), None);
        assert_eq!(parse_sensor_index("sensor", 6), None);
        assert_eq!(parse_sensor_index("sensor01", 6), None);
        assert_eq!(parse_sensor_index("sensor+1", 6), None);
        assert_eq!(parse_sensor_index("sensor1x", 6), None);
        assert_eq!(parse_sensor_index("Sensor1", 6), None);
        assert_eq!(parse_sensor_index("sensor99999999999999999999999", 6), None);
    }

    #[test]
    fn test_parse_request() {
        let request = SensorRequest::parse(&segments("GET /sensor4/temp/c HTTP/1.1"), 6);
        assert_eq!(
            request,
            Ok(SensorRequest {
                index: 4,
                operation: Operation::Temperature(TemperatureUnit::Celsius),
            })
        );
    }

    #[test]
    fn test_nan_is_returned_unchanged() {
        let sensors = vec![FixedSensor::new(f32::NAN, f32::NAN, f32::NAN)];
        let value = dispatch(&segments("GET /sensor0/temp HTTP/1.1"), &sensors);
        assert!(value.unwrap().is_nan());
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let sensors = scenario_sensors();
        let path = segments("GET /sensor0/temp/c HTTP/1.1");
        assert_eq!(dispatch(&path, &sensors), dispatch(&path, &sensors));
    }

    struct CountingSensor {
        reads: AtomicU32,
    }

    impl Sensor for CountingSensor {
        fn read_temperature(&self, _unit: TemperatureUnit) -> f32 {
            self.reads.fetch_add(1, Ordering::Relaxed);
            1.0
        }

        fn read_humidity(&self) -> f32 {
            self.reads.fetch_add(1, Ordering::Relaxed);
            1.0
        }
    }

    #[test]
    fn test_no_read_on_error() {
        let sensors = [CountingSensor {
            reads: AtomicU32::new(0),
        }];

        let _ = dispatch(&segments("GET /sensor0/temp/x HTTP/1.1"), &sensors);
        let _ = dispatch(&segments("GET /sensor0/speed HTTP/1.1"), &sensors);
        assert_eq!(sensors[0].reads.load(Ordering::Relaxed), 0);

        let _ = dispatch(&segments("GET /sensor0/humidity HTTP/1.1"), &sensors);
        assert_eq!(sensors[0].reads.load(Ordering::Relaxed), 1);
    }
}
