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

//! Test the `log` facade adapter against port 514 on the local host.

use log::{debug, error, info, warn};
use syslog_spool::client::Syslog;
use syslog_spool::config::Config;
use syslog_spool::facility::Facility;
use syslog_spool::log04::{install, SyslogLogger};

pub fn main() {
    let config = Config::builder()
        .server("localhost", 514)
        .device_hostname("bree")
        .app_name("log-facade-test")
        .build();
    let syslog = Syslog::try_default(config, "/tmp/spool-log-facade-test.syslog").unwrap();
    install(
        SyslogLogger::new(syslog, Facility::LOG_USER),
        log::LevelFilter::Debug,
    )
    .unwrap();

    debug!("Hello, 世界!");
    info!("Hello, 世界!");
    warn!("Hello, 世界!");
    error!("Hello, 世界!");
}
