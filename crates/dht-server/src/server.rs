//! Single-connection HTTP request loop.
//!
//! The loop accepts a connection, reads until the blank line that ends the
//! request headers, writes the response and closes the connection before
//! accepting the next one. Nothing runs in the background and no state
//! survives a connection except the request buffer, which is cleared.

use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use dht_core::{RequestLine, Sensor, ServerSettings};

use crate::handler::handle_request;

/// Bytes read from the socket per call.
const READ_CHUNK: usize = 64;

/// Configuration for the sensor server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Report dispatch errors and unknown pages with an error status.
    pub strict_status: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSettings::default())
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            bind_addr: settings.bind_addr,
            strict_status: settings.strict_status,
        }
    }
}

/// The sensor HTTP server.
pub struct SensorServer<S> {
    config: ServerConfig,
    sensors: Vec<S>,
    request: RequestLine,
}

impl<S: Sensor> SensorServer<S> {
    /// Create a server answering for `sensors`, in index order.
    pub fn new(config: ServerConfig, sensors: Vec<S>) -> Self {
        Self {
            config,
            sensors,
            request: RequestLine::new(),
        }
    }

    /// Bind the configured address and serve until the task is dropped.
    pub async fn run(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        info!(
            "DHT server listening on {} with {} sensors",
            listener.local_addr()?,
            self.sensors.len()
        );

        self.serve(listener).await;
        Ok(())
    }

    /// Answer connections on `listener`, one at a time.
    pub async fn serve(&mut self, listener: TcpListener) {
        loop {
            match listener.accept().await {
                Ok((mut stream, addr)) => {
                    debug!("New connection from {}", addr);
                    if let Err(e) = self.handle_connection(&mut stream).await {
                        error!("Connection error from {}: {}", addr, e);
                    }
                    self.request.clear();
                }
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                }
            }
        }
    }

    /// Read one request from `stream` and answer it.
    async fn handle_connection(&mut self, stream: &mut TcpStream) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let read = stream.read(&mut chunk).await?;
            if read == 0 {
                debug!("Client closed connection before end of request");
                return Ok(());
            }
            if self.request.feed(&chunk[..read]).is_some() {
                break;
            }
        }

        let response = handle_request(&self.request, &self.sensors, self.config.strict_status);
        info!(
            status = %response.status,
            request = self.request.as_str().lines().next().unwrap_or_default(),
            "Answered request"
        );

        stream.write_all(&response.to_bytes()).await?;
        stream.shutdown().await
    }
}
