//! Response body formatting.
//!
//! All writers take any [`core::fmt::Write`] so they work with a heap
//! `String` on Linux or a fixed-capacity string on a microcontroller.
//! Values are printed with two decimals and failed reads print as zero.

use core::fmt::{self, Write};

use crate::sensor::{or_zero, Reading, Sensor, TemperatureUnit};

/// One `index,tempF,tempC,humidity` line per sensor, in index order.
pub fn write_compact<W: Write, S: Sensor>(out: &mut W, sensors: &[S]) -> fmt::Result {
    for (index, sensor) in sensors.iter().enumerate() {
        let reading = Reading::take(index, sensor);
        writeln!(
            out,
            "{},{:.2},{:.2},{:.2}",
            index, reading.fahrenheit, reading.celsius, reading.humidity
        )?;
    }
    Ok(())
}

/// One `<p>` paragraph per sensor, in index order.
pub fn write_report<W: Write, S: Sensor>(out: &mut W, sensors: &[S]) -> fmt::Result {
    for (index, sensor) in sensors.iter().enumerate() {
        let reading = Reading::take(index, sensor);
        writeln!(
            out,
            "<p>DHT{}: {:.2}{}, {:.2}{}, {:.2}% RH</p>",
            index,
            reading.fahrenheit,
            TemperatureUnit::Fahrenheit.symbol(),
            reading.celsius,
            TemperatureUnit::Celsius.symbol(),
            reading.humidity
        )?;
    }
    Ok(())
}

/// A single dispatched value.
pub fn write_value<W: Write>(out: &mut W, value: f32) -> fmt::Result {
    write!(out, "{:.2}", or_zero(value))
}
