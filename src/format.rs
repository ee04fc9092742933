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
//! Wire-format rendering.
//!
//! Two line formats are supported: the BSD style of RFC [3164] and the structured style of RFC
//! [5424]. Both are rendered _without_ a timestamp-- the collector stamps messages on arrival,
//! which for the intended hosts (no RTC, or a clock that drifts whenever the network is down) is
//! the only stamp worth having. The 5424 variant says so honestly with a NIL timestamp field;
//! 3164 collectors have always stamped un-dated messages themselves.
//!
//! [3164]: https://datatracker.ietf.org/doc/html/rfc3164
//! [5424]: https://datatracker.ietf.org/doc/html/rfc5424
//!
//! A rendered line is also exactly what gets written to the spool when the collector is out of
//! reach, one entry per line, so [`render`] guarantees its output free of CR & LF whatever the
//! caller put in the message.

use crate::priority::Priority;

/// Which line format goes out on the wire. Fixed when the client is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// BSD-style lines: `<PRI>HOSTNAME APPNAME[0]: MSG`. The `[0]` is a fixed stand-in pid;
    /// these hosts have no process table worth reporting.
    Rfc3164,
    /// Structured lines with NIL timestamp/procid/msgid/structured-data fields:
    /// `<PRI>1 - HOSTNAME APPNAME - - - ` followed by the UTF-8 BOM & the message.
    Rfc5424,
}

impl std::default::Default for Protocol {
    fn default() -> Self {
        Protocol::Rfc5424
    }
}

/// UTF-8 byte-order mark; RFC 5424 wants it ahead of any UTF-8 message body.
const BOM: char = '\u{feff}';
/// The NIL value, standing in for every field this client does not supply.
const NILVALUE: &str = "-";

/// Render one record into its single-line wire form.
///
/// There are no error conditions here: an empty hostname or app name renders as the NIL value
/// rather than an empty field, and any CR or LF in the inputs is dropped (the line must live on
/// one line of the spool file).
pub fn render(
    protocol: Protocol,
    priority: Priority,
    hostname: &str,
    app_name: &str,
    message: &str,
) -> String {
    let hostname = if hostname.is_empty() {
        NILVALUE
    } else {
        hostname
    };
    let app_name = if app_name.is_empty() {
        NILVALUE
    } else {
        app_name
    };
    let line = match protocol {
        Protocol::Rfc3164 => format!("<{}>{} {}[0]: {}", priority, hostname, app_name, message),
        Protocol::Rfc5424 => format!(
            "<{}>1 - {} {} - - - {}{}",
            priority, hostname, app_name, BOM, message
        ),
    };
    if line.contains('\r') || line.contains('\n') {
        line.chars().filter(|c| *c != '\r' && *c != '\n').collect()
    } else {
        line
    }
}
