//! # dht-server
//!
//! HTTP request loop for the DHT sensor endpoint.
//!
//! The server accepts one connection at a time, buffers the start of the
//! request, waits for the end of the headers and answers with a complete
//! HTML document before closing the connection. Routing and sensor dispatch
//! come from `dht-core`.

pub mod handler;
pub mod response;
pub mod server;

pub use dht_core::{Sensor, ServerSettings, TemperatureUnit};
pub use handler::handle_request;
pub use response::{Response, Status};
pub use server::{SensorServer, ServerConfig};
