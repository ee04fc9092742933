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
//! A store-and-forward [`syslog`] client for hosts that are only sometimes on the network
//!
//! [`syslog`]: https://en.wikipedia.org/wiki/Syslog
//!
//! # Introduction
//!
//! [`syslog`] over UDP assumes somebody is listening. That assumption rarely holds at the
//! network's edge: a sensor on a flaky WiFi link, a box behind a cell modem, a lamp timer
//! that loses its access point every time the power blips. A conventional syslog client hands
//! its datagram to the network stack and calls that success; if the collector was out of
//! reach, the record is simply gone.
//!
//! This crate's client refuses to lose the record. Each log call runs one complete
//! store-and-forward cycle, synchronously: render the message into a syslog line (shaped per
//! [RFC 3164] or [RFC 5424], caller's choice), ask a cheap HTTP probe whether the collector's
//! host is reachable (a UDP send won't say), and then either send the line or append it to a
//! spool file on local storage. The next call that finds the collector up replays the spool
//! oldest-first before sending its own line, so records arrive in the order they were logged,
//! if sometimes late. Delivery is at-least-once: a replay interrupted partway will be re-sent
//! from the top at the next opportunity.
//!
//! [RFC 3164]: https://www.rfc-editor.org/rfc/rfc3164
//! [RFC 5424]: https://www.rfc-editor.org/rfc/rfc5424
//!
//! Two deliberate omissions are worth calling out. The rendered lines carry _no timestamp_:
//! hosts of the sort this crate serves rarely know what time it is, and a spooled record would
//! bear the wrong time anyway, so the collector's arrival stamp is the only one that can be
//! trusted. And the only error a log call ever returns is "nobody ever named a collector";
//! everything else-- an unreachable network, a full spool device, a refused send-- is handled
//! inside the call and reported on the console & via [`tracing`], never to the caller.
//!
//! [`tracing`]: https://docs.rs/tracing/0.1.35/tracing/index.html
//!
//! # Usage
//!
//! The stock client sends UDP datagrams, probes over plain HTTP, and spools to a file:
//!
//! ```no_run
//! use syslog_spool::client::Syslog;
//! use syslog_spool::config::Config;
//! use syslog_spool::facility::{Facility, Level};
//!
//! let config = Config::builder()
//!     .server("logs.pwpinfra.com", 514)
//!     .device_hostname("bree")
//!     .app_name("lamp")
//!     .build();
//!
//! let mut syslog = Syslog::try_default(config, "/var/spool/lamp.syslog").unwrap();
//!
//! // Collector up: this goes out now. Collector down: it waits in /var/spool/lamp.syslog
//! // for the next call that finds the collector up.
//! syslog
//!     .log((Facility::LOG_USER, Level::LOG_INFO), "lamp on")
//!     .unwrap();
//! ```
//!
//! Will produce syslog entries on the wire that look something like this:
//!
//! ```text
//! <14>1 - bree lamp - - - lamp on
//! ```
//!
//! Configuration can also land after construction; it takes effect on the next call:
//!
//! ```no_run
//! use syslog_spool::client::Syslog;
//! use syslog_spool::config::{Config, Endpoint};
//! use syslog_spool::facility::Level;
//!
//! let mut syslog = Syslog::try_default(Config::default(), "/var/spool/kettle.syslog").unwrap();
//!
//! syslog
//!     .set_server(Endpoint::name("logs.pwpinfra.com", 514))
//!     .set_device_hostname("took")
//!     .set_app_name("kettle")
//!     .set_log_mask(0xff & !Level::LOG_DEBUG.mask_bit())
//!     .set_echo(true);
//!
//! syslog.log_default("kettle on").unwrap();
//! ```
//!
//! The transport, the reachability probe, the spool's storage and the echo console are all
//! traits; [`Syslog`](client::Syslog) is generic over the lot, so any of them can be swapped
//! out (the stock probe lives behind the `http-probe` feature, on by default). The `log04`
//! feature adds an adapter exposing the client as a backend for the [`log`] facade.
//!
//! [`log`]: https://docs.rs/log/0.4/log/index.html

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod facility;
pub mod format;
#[cfg(feature = "log04")]
pub mod log04;
#[cfg(test)]
pub mod mock;
pub mod priority;
pub mod probe;
pub mod spool;
pub mod transport;
