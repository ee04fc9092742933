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

//! An adapter from the `log` facade to a store-and-forward [`Syslog`] client.
//!
//! `log`'s [`Log`] implementations must be `Sync`; the client is anything but, so the adapter
//! owns it behind a [`Mutex`]. The facade's five levels map onto syslog severities the obvious
//! way (`Trace` & `Debug` both land on `LOG_DEBUG`), and since the facade has no notion of a
//! facility, every record goes out under the one the adapter was built with.

use crate::client::Syslog;
use crate::console::Console;
use crate::facility::{Facility, Level};
use crate::priority::Priority;
use crate::probe::Probe;
use crate::spool::Storage;
use crate::transport::Transport;

use log04::{max_level, Log, Metadata, Record};

use std::sync::Mutex;

fn map_level(level: log04::Level) -> Level {
    match level {
        log04::Level::Trace | log04::Level::Debug => Level::LOG_DEBUG,
        log04::Level::Info => Level::LOG_INFO,
        log04::Level::Warn => Level::LOG_WARNING,
        log04::Level::Error => Level::LOG_ERR,
    }
}

/// [`Log`] over a store-and-forward client.
pub struct SyslogLogger<T: Transport, P: Probe, S: Storage, C: Console> {
    syslog: Mutex<Syslog<T, P, S, C>>,
    facility: Facility,
}

impl<T: Transport, P: Probe, S: Storage, C: Console> SyslogLogger<T, P, S, C> {
    /// Wrap `syslog`; every record will go out under `facility`.
    pub fn new(syslog: Syslog<T, P, S, C>, facility: Facility) -> Self {
        SyslogLogger {
            syslog: Mutex::new(syslog),
            facility,
        }
    }
}

impl<T, P, S, C> Log for SyslogLogger<T, P, S, C>
where
    T: Transport + Send,
    P: Probe + Send,
    S: Storage + Send,
    C: Console + Send,
{
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let priority = Priority::new(self.facility, map_level(record.level()));
        // A panicked holder can't have left the client in a bad state; every delivery runs
        // to completion inside the lock. Take the guard & carry on.
        let mut syslog = match self.syslog.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = syslog.logf(priority, *record.args()) {
            tracing::error!("failed to forward a log record to syslog: {}", err);
        }
    }

    fn flush(&self) {}
}

/// Install `logger` as the process-wide `log` sink, accepting records up to `max`.
pub fn install<T, P, S, C>(
    logger: SyslogLogger<T, P, S, C>,
    max: log04::LevelFilter,
) -> std::result::Result<(), log04::SetLoggerError>
where
    T: Transport + Send + 'static,
    P: Probe + Send + 'static,
    S: Storage + Send + 'static,
    C: Console + Send + 'static,
{
    log04::set_boxed_logger(Box::new(logger))?;
    log04::set_max_level(max);
    Ok(())
}
