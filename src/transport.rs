// Copyright (C) 2024-2026 Michael Herstine <sp1ff@pobox.com>
//
// This file is part of syslog-spool.
//
// syslog-spool is free software: you can redistribute it and/or modify it under the terms of the
// GNU General Public License as published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// mpdpopm is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even
// the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General
// Public License for more details.
//
// You should have received a copy of the GNU General Public License along with mpdpopm.  If not,
// see <http://www.gnu.org/licenses/>.

//! The syslog transport layer.
//!
//! This module defines the [`Transport`] trait that all implementations must support, as well
//! as the UDP implementation.
//!
//! A transport here sits a little lower than a connected socket: the collector may come & go, so
//! the endpoint is named on every [`open`](Transport::open) rather than once up front, and one
//! datagram is one open/write/close cycle. The client opens a fresh cycle for every line it
//! sends-- including each line replayed from the spool.
//!
//! # Examples
//!
//! ```rust
//! use syslog_spool::transport::UdpTransport;
//! let transpo = UdpTransport::new().unwrap();
//! ```

use crate::config::{Endpoint, Host};
use crate::error::{Error, Result};

use backtrace::Backtrace;

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                      transport mechanisms                                      //
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Operations all transport layers must support.
///
/// It would be nice to make [`write`](Transport::write) more general, to accept input in a
/// variety of forms that might support zero-copy, but at the end of the day datagram sockets
/// operate on a contiguous slice of `u8`, so we require that our caller assemble one.
pub trait Transport {
    /// Begin a datagram to `endpoint`. Name resolution happens here, afresh on every open.
    fn open(&mut self, endpoint: &Endpoint) -> Result<()>;
    /// Add bytes to the open datagram (or, for unbuffered implementations, send them).
    fn write(&mut self, frame: &[u8]) -> Result<()>;
    /// Finish the cycle begun by [`open`](Transport::open).
    fn close(&mut self) -> Result<()>;
}

/// Sending syslog messages via UDP datagrams.
pub struct UdpTransport {
    socket: UdpSocket,
    target: Option<SocketAddr>,
}

impl UdpTransport {
    /// Bind an ephemeral local port to send from.
    pub fn new() -> Result<UdpTransport> {
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(|err| Error::Transport {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(UdpTransport {
            socket,
            target: None,
        })
    }
}

impl Transport for UdpTransport {
    fn open(&mut self, endpoint: &Endpoint) -> Result<()> {
        let addr = match &endpoint.host {
            Host::Addr(ip) => SocketAddr::new(*ip, endpoint.port),
            Host::Name(name) => (name.as_str(), endpoint.port)
                .to_socket_addrs()
                .map_err(|err| Error::Transport {
                    source: Box::new(err),
                    back: Backtrace::new(),
                })?
                .next()
                .ok_or_else(|| Error::Transport {
                    source: Box::new(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{} did not resolve to any address", name),
                    )),
                    back: Backtrace::new(),
                })?,
        };
        self.target = Some(addr);
        Ok(())
    }
    fn write(&mut self, frame: &[u8]) -> Result<()> {
        let target = self.target.ok_or_else(|| Error::Transport {
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "write without open",
            )),
            back: Backtrace::new(),
        })?;
        self.socket
            .send_to(frame, target)
            .map_err(|err| Error::Transport {
                source: Box::new(err),
                back: Backtrace::new(),
            })?;
        Ok(())
    }
    fn close(&mut self) -> Result<()> {
        self.target = None;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cycle() {
        let mut udp = UdpTransport::new().unwrap();
        // Write before open is a (caught) programming error.
        assert!(udp.write(b"<14>bree lamp[0]: on").is_err());
        // A literal address resolves without DNS; nobody need be listening for a datagram
        // to leave the building.
        let ep = Endpoint::addr(std::net::Ipv4Addr::LOCALHOST, 8514);
        udp.open(&ep).unwrap();
        udp.write(b"<14>bree lamp[0]: on").unwrap();
        udp.close().unwrap();
        // Closed again: the target is gone.
        assert!(udp.write(b"<14>bree lamp[0]: off").is_err());
    }

    #[test]
    fn test_name_resolution() {
        let mut udp = UdpTransport::new().unwrap();
        udp.open(&Endpoint::name("localhost", 514)).unwrap();
        udp.close().unwrap();
    }
}
