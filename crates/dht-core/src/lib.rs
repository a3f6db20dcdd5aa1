//! # dht-core
//!
//! Request handling core for the DHT sensor endpoint.
//!
//! This crate provides:
//! - Request line buffering and end-of-request detection
//! - Substring-based route classification
//! - URL path tokenizing into borrowed segments
//! - Dispatch of path segments to sensor reads
//! - Compact and report body formatting
//! - Server settings shared by every platform
//!
//! This crate is intentionally runtime-agnostic and contains no async code.
//! The request path allocates nothing: the request line and the segment list
//! are fixed-capacity buffers.

pub mod config;
pub mod dispatch;
pub mod format;
pub mod matcher;
pub mod path;
pub mod request;
pub mod sensor;

pub use config::{SensorSettings, ServerSettings, SettingsError};
pub use dispatch::{dispatch, parse_sensor_index, DispatchError, Operation, SensorRequest};
pub use matcher::{contains, Route};
pub use path::{PathSegments, MAX_SEGMENTS};
pub use request::{RequestLine, REQUEST_LINE_CAPACITY};
pub use sensor::{celsius_to_fahrenheit, Reading, Sensor, TemperatureUnit};
