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

//! The store-and-forward client.
//!
//! [`Syslog`] ties the collaborators together: per log call it echoes (if asked), filters,
//! probes, and then either parks the record in the [`Spool`] (collector out of reach) or
//! replays the backlog & sends the live record (collector answering). The whole cycle runs to
//! completion, synchronously, inside the call; there is no background thread & no cross-call
//! state beyond the configuration and whatever sits in the spool file.

use crate::config::{Config, Endpoint, Identity};
use crate::console::{Console, StderrConsole};
use crate::error::{Error, Result};
use crate::format::render;
use crate::priority::Priority;
use crate::probe::{probe_url, reachable, Probe};
#[cfg(feature = "http-probe")]
use crate::probe::HttpProbe;
use crate::spool::{Spool, Storage};
#[cfg(feature = "http-probe")]
use crate::spool::FsStorage;
use crate::transport::Transport;
#[cfg(feature = "http-probe")]
use crate::transport::UdpTransport;

/// A store-and-forward syslog client.
///
/// One instance owns one [`Transport`], one [`Probe`], one [`Spool`] & one [`Console`], plus
/// the [`Config`] every send consults. The only error a caller ever sees is
/// [`Error::NotConfigured`]; everything else resolves internally-- a filtered record is quietly
/// dropped, an unreachable collector defers the record to the spool, and storage or transport
/// trouble is noted on the console & via [`tracing`] but never propagated. Hosts log in one
/// line & move on.
///
/// Exactly-once this is not: a replay interrupted partway will be re-sent from the top on the
/// next opportunity, and the collector may see a line twice. What the client does promise is
/// that lines never jump the queue-- the spool is strictly oldest-first, and a live record
/// files in behind any backlog it could not flush.
///
/// A client is single-threaded on purpose; callers overlapping from several threads must
/// serialize access themselves (the `log04` feature's adapter does exactly that with a
/// [`Mutex`](std::sync::Mutex)).
///
/// # Examples
///
/// ```no_run
/// use syslog_spool::client::Syslog;
/// use syslog_spool::config::Config;
/// use syslog_spool::facility::{Facility, Level};
///
/// let mut syslog = Syslog::try_default(
///     Config::builder()
///         .server("logs.pwpinfra.com", 514)
///         .device_hostname("bree")
///         .app_name("lamp")
///         .build(),
///     "/var/spool/lamp.syslog",
/// )
/// .unwrap();
///
/// syslog
///     .log((Facility::LOG_USER, Level::LOG_INFO), "lamp on")
///     .unwrap();
/// ```
pub struct Syslog<T: Transport, P: Probe, S: Storage, C: Console = StderrConsole> {
    transport: T,
    probe: P,
    spool: Spool<S>,
    console: C,
    config: Config,
}

#[cfg(feature = "http-probe")]
impl Syslog<UdpTransport, HttpProbe, FsStorage, StderrConsole> {
    /// A client over the stock collaborators: UDP out, HTTP probe, spool file on the local
    /// filesystem, echo (if enabled) to stderr.
    pub fn try_default<Q: Into<std::path::PathBuf>>(config: Config, spool_path: Q) -> Result<Self> {
        Ok(Syslog {
            transport: UdpTransport::new()?,
            probe: HttpProbe::new()?,
            spool: Spool::new(FsStorage, spool_path),
            console: StderrConsole,
            config,
        })
    }
}

impl<T: Transport, P: Probe, S: Storage> Syslog<T, P, S, StderrConsole> {
    /// Assemble a client from parts, echoing to stderr.
    pub fn new(transport: T, probe: P, spool: Spool<S>, config: Config) -> Self {
        Syslog {
            transport,
            probe,
            spool,
            console: StderrConsole,
            config,
        }
    }
}

impl<T: Transport, P: Probe, S: Storage, C: Console> Syslog<T, P, S, C> {
    /// Assemble a client from parts, naming the console too.
    pub fn with_console(transport: T, probe: P, spool: Spool<S>, console: C, config: Config) -> Self {
        Syslog {
            transport,
            probe,
            spool,
            console,
            config,
        }
    }

    /// The live configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Swap the whole configuration; takes effect on the next log call.
    pub fn set_config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }
    /// Point the client at a (new) collector.
    pub fn set_server(&mut self, endpoint: Endpoint) -> &mut Self {
        self.config.endpoint = Some(endpoint);
        self
    }
    pub fn set_device_hostname<H: Into<String>>(&mut self, hostname: H) -> &mut Self {
        self.config.identity.hostname = hostname.into();
        self
    }
    pub fn set_app_name<A: Into<String>>(&mut self, app_name: A) -> &mut Self {
        self.config.identity.app_name = app_name.into();
        self
    }
    pub fn set_identity(&mut self, identity: Identity) -> &mut Self {
        self.config.identity = identity;
        self
    }
    /// The priority overlaid on facility-less records.
    pub fn set_default_priority<Q: Into<Priority>>(&mut self, priority: Q) -> &mut Self {
        self.config.policy.default_priority = priority.into();
        self
    }
    /// One bit per severity; see [`Level::mask_bit`](crate::facility::Level::mask_bit).
    pub fn set_log_mask(&mut self, mask: u8) -> &mut Self {
        self.config.policy.mask = mask;
        self
    }
    /// Mirror every record to the console, ahead of any filtering.
    pub fn set_echo(&mut self, echo: bool) -> &mut Self {
        self.config.echo = echo;
        self
    }

    /// Log one record.
    ///
    /// `Ok(())` means the record was sent, spooled for later, filtered out, or lost to trouble
    /// already reported on the console-- from the caller's seat those are all "handled". The
    /// one hard error is [`Error::NotConfigured`]: nobody ever named a collector.
    pub fn log<Q: Into<Priority>>(&mut self, priority: Q, message: &str) -> Result<()> {
        self.deliver(priority.into(), message)
    }

    /// Log one record at the configured default priority.
    pub fn log_default(&mut self, message: &str) -> Result<()> {
        self.deliver(self.config.policy.default_priority, message)
    }

    /// Format & log in one motion: `syslog.logf(pri, format_args!("count: {}", n))`.
    pub fn logf<Q: Into<Priority>>(
        &mut self,
        priority: Q,
        args: std::fmt::Arguments,
    ) -> Result<()> {
        self.deliver(priority.into(), &args.to_string())
    }

    /// [`logf`](Syslog::logf) at the configured default priority.
    pub fn logf_default(&mut self, args: std::fmt::Arguments) -> Result<()> {
        self.deliver(self.config.policy.default_priority, &args.to_string())
    }

    /// The whole store-and-forward cycle for one record.
    fn deliver(&mut self, priority: Priority, message: &str) -> Result<()> {
        // The echo precedes everything, even the mask: the console hears what the caller
        // said whether or not it goes anywhere.
        if self.config.echo {
            let text = format!("{}: {}", priority.severity().name(), message);
            self.console.line(&text);
        }

        let priority = match self.config.policy.admit(priority) {
            Some(priority) => priority,
            None => return Ok(()),
        };

        let endpoint = match &self.config.endpoint {
            Some(endpoint) if endpoint.is_usable() => endpoint.clone(),
            _ => return Err(Error::NotConfigured),
        };

        let line = render(
            self.config.protocol,
            priority,
            &self.config.identity.hostname,
            &self.config.identity.app_name,
            message,
        );

        // Datagrams don't report an unreachable collector; ask the probe.
        let up = match self.probe.get(&probe_url(&endpoint)) {
            Ok(status) => reachable(status),
            Err(err) => {
                tracing::debug!("reachability probe failed: {}", err);
                false
            }
        };

        if !up {
            return self.spool_line(&line);
        }

        // One throwaway session before touching the spool. If the transport can't even open--
        // the name won't resolve, say-- leave the backlog where it is & let this record go:
        // the probe just said the network is up, so this is the transport's own trouble, not
        // an outage to ride out.
        if let Err(err) = self
            .transport
            .open(&endpoint)
            .and_then(|_| self.transport.close())
        {
            tracing::warn!("transport would not open a session: {}", err);
            return Ok(());
        }

        let drained = match self.drain(&endpoint) {
            Ok(complete) => complete,
            Err(err) => {
                let text = format!("syslog spool read failed: {}", err);
                self.console.line(&text);
                tracing::warn!("{}", text);
                false
            }
        };

        if drained {
            if let Err(err) = self.spool.clear() {
                let text = format!("syslog spool clear failed: {}", err);
                self.console.line(&text);
                tracing::warn!("{}", text);
            }
            if let Err(err) = Self::send_on(&mut self.transport, &endpoint, &line) {
                tracing::warn!("send failed after a clean drain: {}", err);
            }
            Ok(())
        } else {
            // Entries survived; the live record files in behind them rather than jumping
            // the queue.
            self.spool_line(&line)
        }
    }

    /// Replay the backlog, one fresh session per line. `Ok(true)` means every line went out.
    fn drain(&mut self, endpoint: &Endpoint) -> Result<bool> {
        let transport = &mut self.transport;
        self.spool.drain_all(|line| {
            match Self::send_on(transport, endpoint, line) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!("spool replay interrupted: {}", err);
                    false
                }
            }
        })
    }

    /// One datagram: open, write, close. The close runs whether or not the write landed.
    fn send_on(transport: &mut T, endpoint: &Endpoint, line: &str) -> Result<()> {
        transport.open(endpoint)?;
        let sent = transport.write(line.as_bytes());
        let closed = transport.close();
        sent.and(closed)
    }

    /// Park one rendered line in the spool; storage trouble lands on the console, not on the
    /// caller.
    fn spool_line(&mut self, line: &str) -> Result<()> {
        if let Err(err) = self.spool.append(line) {
            let text = format!("syslog spool append failed: {}", err);
            self.console.line(&text);
            tracing::warn!("{}", text);
        }
        Ok(())
    }
}
