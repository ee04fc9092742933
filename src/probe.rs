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
//! Reachability probing.
//!
//! Datagrams don't bounce: sending into a black hole looks exactly like success. So before
//! spending the spooled backlog the client asks a [`Probe`] whether anything out there is
//! answering. The stock implementation is one plain-HTTP `GET` against the collector's host--
//! or against a well-known fallback when only a literal address is configured-- with 200 & 301
//! the two answers that count as "up" (a host redirecting to its canonical name is still very
//! much a host on the network).
//!
//! Anything fancier-- an ICMP ping, a TCP connect against the collector itself, a cloud
//! health-check endpoint-- is one [`Probe`] implementation away.

use crate::config::{Endpoint, Host};
#[cfg(feature = "http-probe")]
use crate::error::Error;
use crate::error::Result;

#[cfg(feature = "http-probe")]
use backtrace::Backtrace;

/// One round-trip against a URL, reporting the HTTP status.
pub trait Probe {
    fn get(&mut self, url: &str) -> Result<u16>;
}

/// Where the probe goes when the collector can't be named: a host assumed to be answering
/// whenever the network is up at all.
pub const FALLBACK_PROBE_HOST: &str = "google.com";

/// The URL [`get`](Probe::get) will be pointed at for `endpoint`.
pub fn probe_url(endpoint: &Endpoint) -> String {
    match &endpoint.host {
        Host::Name(name) => format!("http://{}/", name),
        Host::Addr(_) => format!("http://{}/", FALLBACK_PROBE_HOST),
    }
}

/// Does this status mean "reachable"?
pub fn reachable(status: u16) -> bool {
    status == 200 || status == 301
}

/// How long to wait on the probe before declaring the collector out of reach.
#[cfg(feature = "http-probe")]
const PROBE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// [`Probe`] over a blocking [`reqwest`] client.
///
/// Redirects are deliberately _not_ followed: a 301 is one of the answers the client wants to
/// see, and chasing it to a 200 would hide the other. The request carries a bounded timeout
/// (`PROBE_TIMEOUT`) so a dead network parks a log call for five seconds, not forever.
///
/// [`reqwest`]: https://docs.rs/reqwest
#[cfg(feature = "http-probe")]
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http-probe")]
impl HttpProbe {
    pub fn new() -> Result<HttpProbe> {
        let client = reqwest::blocking::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| Error::Probe {
                source: Box::new(err),
                back: Backtrace::new(),
            })?;
        Ok(HttpProbe { client })
    }
}

#[cfg(feature = "http-probe")]
impl Probe for HttpProbe {
    fn get(&mut self, url: &str) -> Result<u16> {
        let response = self.client.get(url).send().map_err(|err| Error::Probe {
            source: Box::new(err),
            back: Backtrace::new(),
        })?;
        Ok(response.status().as_u16())
    }
}
