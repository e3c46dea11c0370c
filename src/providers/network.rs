//! Network provider for remote logging
//!
//! Sends rendered records to a remote collector over TCP. The connection
//! is established lazily so constructing the provider never depends on a
//! live peer.

use super::parse_options;
use crate::core::{DispatchError, Provider, Record, Result};
use serde::Deserialize;
use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
#[serde(default)]
struct NetworkOptions {
    addr: String,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9090".to_string(),
        }
    }
}

/// TCP sink with one reconnect attempt per failed write.
pub struct NetworkProvider {
    stream: Option<TcpStream>,
    address: String,
}

impl NetworkProvider {
    /// Construct from the opaque JSON options payload
    /// (`{"addr": "host:port"}`).
    pub fn from_options(opts: &str) -> Result<Self> {
        let options: NetworkOptions = parse_options("network", opts)?;
        Ok(Self::new(options.addr))
    }

    pub fn new(address: impl Into<String>) -> Self {
        Self {
            stream: None,
            address: address.into(),
        }
    }

    fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect(&self.address)?;
        stream.set_write_timeout(Some(WRITE_TIMEOUT))?;
        stream.set_nodelay(true)?;
        self.stream = Some(stream);
        Ok(())
    }

    fn send(&mut self, payload: &[u8]) -> std::io::Result<()> {
        match self.stream {
            Some(ref mut stream) => stream.write_all(payload),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "stream not connected",
            )),
        }
    }
}

impl Provider for NetworkProvider {
    fn write(&mut self, record: &Record) -> Result<()> {
        let mut line = record.format_line();
        line.push('\n');

        if self.stream.is_none() {
            self.connect()?;
        }

        match self.send(line.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                // Connection lost; retry once on a fresh stream.
                self.stream = None;
                match self.connect() {
                    Ok(()) => {
                        self.send(line.as_bytes())?;
                        Ok(())
                    }
                    Err(reconnect_err) => Err(DispatchError::writer(format!(
                        "failed to send record and reconnect to {}: {} (reconnect: {})",
                        self.address, e, reconnect_err
                    ))),
                }
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut stream) = self.stream {
            stream.flush()?;
        }
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "network"
    }
}

impl Drop for NetworkProvider {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
