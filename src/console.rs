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
//! The console collaborator.
//!
//! Two things land here: the optional debug echo (`SEVERITY: message`, mirrored ahead of any
//! filtering when [`Config::echo`](crate::config::Config) is set), and notices about trouble the
//! client resolves internally-- a spool that won't append, say-- which the caller never sees as
//! an error. On an embedded host this would be the serial line; here it defaults to `stderr`.

/// A best-effort, line-oriented text sink. Nothing that happens here may affect delivery.
pub trait Console {
    fn line(&mut self, text: &str);
}

/// [`Console`] writing to the standard error stream.
#[derive(Default)]
pub struct StderrConsole;

impl Console for StderrConsole {
    fn line(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// [`Console`] that discards everything.
#[derive(Default)]
pub struct NullConsole;

impl Console for NullConsole {
    fn line(&mut self, _text: &str) {}
}
