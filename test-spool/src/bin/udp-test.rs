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

//! Test writing to port 514 on the local host, one record per severity.

use syslog_spool::client::Syslog;
use syslog_spool::config::{Config, Identity};
use syslog_spool::facility::{Facility, Level};

pub fn main() {
    let config = Config::builder()
        .server("localhost", 514)
        .identity(Identity::local())
        .echo(true)
        .build();
    let mut syslog = Syslog::try_default(config, "/tmp/spool-udp-test.syslog").unwrap();

    for level in [
        Level::LOG_DEBUG,
        Level::LOG_INFO,
        Level::LOG_NOTICE,
        Level::LOG_WARNING,
        Level::LOG_ERR,
    ] {
        syslog
            .log((Facility::LOG_USER, level), "Hello, 世界!")
            .unwrap();
    }
}
