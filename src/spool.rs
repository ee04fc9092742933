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
//! The persistent queue of rendered lines awaiting a reachable collector.
//!
//! When the collector is out of reach, records are not dropped; they are appended, already
//! rendered, to a single backing file-- one entry per line. Once the collector answers again the
//! whole file is replayed oldest-first & then removed. The file is only ever removed _whole_:
//! a replay that stops partway leaves every remaining entry exactly where it was, so the spool
//! never reorders & never loses an entry short of an explicit [`clear`](Spool::clear).

use crate::error::{Error, Result};

use backtrace::Backtrace;

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Byte storage underneath the [`Spool`].
///
/// The spool asks very little of its medium: append bytes to a single well-known file, read it
/// back top-to-bottom, delete it. Flash filesystems, plain disks & in-memory test doubles all
/// manage that much, so the trait deals in `std::io` types & lets [`BufRead`] do the line
/// bookkeeping.
pub trait Storage {
    type Append: Write;
    type Read: BufRead;
    /// Open `path` for appending, creating it if need be.
    fn open_append(&mut self, path: &Path) -> std::io::Result<Self::Append>;
    /// Open `path` for reading from the top. `ErrorKind::NotFound` means "nothing spooled",
    /// which is not an error to the spool.
    fn open_read(&mut self, path: &Path) -> std::io::Result<Self::Read>;
    /// Delete `path`. Deleting a file that isn't there must succeed.
    fn remove(&mut self, path: &Path) -> std::io::Result<()>;
}

/// [`Storage`] over the local filesystem.
pub struct FsStorage;

impl Storage for FsStorage {
    type Append = File;
    type Read = BufReader<File>;
    fn open_append(&mut self, path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }
    fn open_read(&mut self, path: &Path) -> std::io::Result<BufReader<File>> {
        Ok(BufReader::new(File::open(path)?))
    }
    fn remove(&mut self, path: &Path) -> std::io::Result<()> {
        match std::fs::remove_file(path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// A FIFO of rendered syslog lines over one backing file.
pub struct Spool<S: Storage> {
    storage: S,
    path: PathBuf,
}

impl<S: Storage> Spool<S> {
    pub fn new<P: Into<PathBuf>>(storage: S, path: P) -> Spool<S> {
        Spool {
            storage,
            path: path.into(),
        }
    }
    /// The backing file's location.
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Append one line at the tail.
    pub fn append(&mut self, line: &str) -> Result<()> {
        let mut sink = self
            .storage
            .open_append(&self.path)
            .map_err(|err| Error::Storage {
                source: Box::new(err),
                back: Backtrace::new(),
            })?;
        writeln!(sink, "{}", line).map_err(|err| Error::Storage {
            source: Box::new(err),
            back: Backtrace::new(),
        })
    }
    /// Feed every stored line, oldest first, to `sink`; `sink` answers `false` to refuse one.
    ///
    /// Returns `Ok(true)` when every line was accepted-- an absent backing file counts, there
    /// being nothing to refuse-- & `Ok(false)` when `sink` refused a line, in which case the
    /// remaining lines were not offered. Nothing is deleted here either way; that is
    /// [`clear`](Spool::clear)'s job, and the caller's call.
    pub fn drain_all<F: FnMut(&str) -> bool>(&mut self, mut sink: F) -> Result<bool> {
        let reader = match self.storage.open_read(&self.path) {
            Ok(reader) => reader,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(true),
            Err(err) => {
                return Err(Error::Storage {
                    source: Box::new(err),
                    back: Backtrace::new(),
                })
            }
        };
        for line in reader.lines() {
            let line = line.map_err(|err| Error::Storage {
                source: Box::new(err),
                back: Backtrace::new(),
            })?;
            // Files written by earlier firmware end lines with CRLF; `lines()` strips the
            // trailing pair but a bare CR can still sneak through.
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            if !sink(line) {
                return Ok(false);
            }
        }
        Ok(true)
    }
    /// Drop the whole backlog. Idempotent; clearing an empty spool is a no-op.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(&self.path).map_err(|err| Error::Storage {
            source: Box::new(err),
            back: Backtrace::new(),
        })
    }
}
