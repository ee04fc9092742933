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

//! Exercise the spool: log against a collector that isn't there, then read the backlog back.
//!
//! `.invalid` never resolves, so the probe reports the collector unreachable & every record
//! lands in the spool file. Re-point the server at a live collector & run again to watch the
//! backlog drain ahead of the new record.

use syslog_spool::client::Syslog;
use syslog_spool::config::Config;
use syslog_spool::facility::{Facility, Level};

pub fn main() {
    let spool = "/tmp/spool-offline-test.syslog";
    let config = Config::builder()
        .server("collector.invalid", 514)
        .device_hostname("bree")
        .app_name("offline-test")
        .build();
    let mut syslog = Syslog::try_default(config, spool).unwrap();

    syslog
        .log((Facility::LOG_USER, Level::LOG_INFO), "one")
        .unwrap();
    syslog
        .log((Facility::LOG_USER, Level::LOG_INFO), "two")
        .unwrap();
    syslog
        .log((Facility::LOG_USER, Level::LOG_NOTICE), "three")
        .unwrap();

    match std::fs::read_to_string(spool) {
        Ok(text) => print!("spooled at {}:\n{}", spool, text),
        Err(err) => println!("nothing spooled ({})", err),
    }
}
