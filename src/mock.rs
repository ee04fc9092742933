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

//! Test doubles for the client's collaborators.
//!
//! Each double hands out cloneable inspection handles over [`Rc`], so a test can move one
//! clone into the client & keep another to assert against afterwards. The tests are
//! single-threaded; none of this needs to be `Send`.

use crate::config::Endpoint;
use crate::console::Console;
use crate::error::{Error, Result};
use crate::probe::Probe;
use crate::spool::Storage;
use crate::transport::Transport;

use backtrace::Backtrace;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// In-memory [`Storage`]: a map from path to bytes.
#[derive(Clone, Default)]
pub struct MemStorage {
    files: Rc<RefCell<HashMap<PathBuf, Vec<u8>>>>,
    /// When set, the next & every subsequent `open_append` fails.
    pub fail_append: Rc<Cell<bool>>,
}

impl MemStorage {
    pub fn new() -> MemStorage {
        MemStorage::default()
    }
    /// The file at `path` as text, or `None` if nothing was ever written (or it was removed).
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

pub struct MemAppend {
    files: Rc<RefCell<HashMap<PathBuf, Vec<u8>>>>,
    path: PathBuf,
}

impl Write for MemAppend {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.files
            .borrow_mut()
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Storage for MemStorage {
    type Append = MemAppend;
    type Read = Cursor<Vec<u8>>;
    fn open_append(&mut self, path: &Path) -> io::Result<MemAppend> {
        if self.fail_append.get() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "storage full"));
        }
        Ok(MemAppend {
            files: self.files.clone(),
            path: path.to_path_buf(),
        })
    }
    fn open_read(&mut self, path: &Path) -> io::Result<Cursor<Vec<u8>>> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .map(Cursor::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no spool file"))
    }
    fn remove(&mut self, path: &Path) -> io::Result<()> {
        self.files.borrow_mut().remove(path);
        Ok(())
    }
}

/// One observable transport call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Open(String, u16),
    Write(String),
    Close,
}

/// A [`Transport`] that records its calls & fails on cue.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    events: Rc<RefCell<Vec<Event>>>,
    fail_open_at: Rc<Cell<Option<usize>>>,
    fail_write_at: Rc<Cell<Option<usize>>>,
    opens: Rc<Cell<usize>>,
    writes: Rc<Cell<usize>>,
}

impl RecordingTransport {
    pub fn new() -> RecordingTransport {
        RecordingTransport::default()
    }
    /// Fail the `n`-th `open` (zero-based), once.
    pub fn fail_open(&self, n: usize) {
        self.fail_open_at.set(Some(n));
    }
    /// Fail the `n`-th `write` (zero-based), once.
    pub fn fail_write(&self, n: usize) {
        self.fail_write_at.set(Some(n));
    }
    /// Every call so far, in order.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
    /// Just the written frames, in order.
    pub fn payloads(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Write(frame) => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn open(&mut self, endpoint: &Endpoint) -> Result<()> {
        let idx = self.opens.get();
        self.opens.set(idx + 1);
        if self.fail_open_at.get() == Some(idx) {
            self.fail_open_at.set(None);
            return Err(Error::Transport {
                source: Box::new(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "no route to the collector",
                )),
                back: Backtrace::new(),
            });
        }
        self.events
            .borrow_mut()
            .push(Event::Open(endpoint.host.to_string(), endpoint.port));
        Ok(())
    }
    fn write(&mut self, frame: &[u8]) -> Result<()> {
        let idx = self.writes.get();
        self.writes.set(idx + 1);
        if self.fail_write_at.get() == Some(idx) {
            self.fail_write_at.set(None);
            return Err(Error::Transport {
                source: Box::new(io::Error::new(io::ErrorKind::BrokenPipe, "tx failed")),
                back: Backtrace::new(),
            });
        }
        self.events
            .borrow_mut()
            .push(Event::Write(String::from_utf8_lossy(frame).into_owned()));
        Ok(())
    }
    fn close(&mut self) -> Result<()> {
        self.events.borrow_mut().push(Event::Close);
        Ok(())
    }
}

/// A [`Probe`] that answers from a script & logs the URLs it was asked about.
pub struct ScriptedProbe {
    answers: Vec<Option<u16>>,
    urls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedProbe {
    /// Answer `status` to every request.
    pub fn always(status: u16) -> ScriptedProbe {
        ScriptedProbe {
            answers: vec![Some(status)],
            urls: Rc::default(),
        }
    }
    /// Fail every request outright, as if the probe timed out.
    pub fn failing() -> ScriptedProbe {
        ScriptedProbe {
            answers: vec![None],
            urls: Rc::default(),
        }
    }
    /// Answer from `answers` in order; the last one repeats.
    pub fn script<I: IntoIterator<Item = Option<u16>>>(answers: I) -> ScriptedProbe {
        ScriptedProbe {
            answers: answers.into_iter().collect(),
            urls: Rc::default(),
        }
    }
    /// A handle on the URLs requested so far.
    pub fn url_log(&self) -> Rc<RefCell<Vec<String>>> {
        self.urls.clone()
    }
}

impl Probe for ScriptedProbe {
    fn get(&mut self, url: &str) -> Result<u16> {
        self.urls.borrow_mut().push(url.to_string());
        let answer = if self.answers.len() > 1 {
            self.answers.remove(0)
        } else {
            self.answers[0]
        };
        match answer {
            Some(status) => Ok(status),
            None => Err(Error::Probe {
                source: Box::new(io::Error::new(io::ErrorKind::TimedOut, "probe timed out")),
                back: Backtrace::new(),
            }),
        }
    }
}

/// A [`Console`] that keeps what it was told.
#[derive(Clone, Default)]
pub struct CapturingConsole {
    lines: Rc<RefCell<Vec<String>>>,
}

impl CapturingConsole {
    pub fn new() -> CapturingConsole {
        CapturingConsole::default()
    }
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Console for CapturingConsole {
    fn line(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}
