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
//! Combined facility/severity priorities & the policy that admits them.
//!
//! A syslog PRI is `facility * 8 + severity`, the value `syslog(3)` callers have been ORing
//! together since the eighties. [`Priority`] wraps that raw value; [`PriorityPolicy`] holds the
//! two knobs that decide what becomes of one handed to the client: a severity mask, and a
//! default priority whose facility is overlaid on priorities that arrived without one.

use crate::facility::{Facility, Level};

/// Bits of a raw priority encoding the facility (`LOG_FACMASK` in `<syslog.h>`).
pub const FACILITY_MASK: u16 = 0x03f8;
/// Bits of a raw priority encoding the severity (`LOG_PRIMASK` in `<syslog.h>`).
pub const SEVERITY_MASK: u16 = 0x0007;

/// A facility ORed with a severity.
///
/// Anything that can reasonably be read as a priority converts into one: a
/// ([`Facility`], [`Level`]) pair, a bare [`Level`] (no facility bits-- the policy's default
/// facility will be overlaid at send time), or a raw `u16` from a C-style caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Priority(u16);

impl Priority {
    /// Combine a facility & a severity.
    pub fn new(facility: Facility, level: Level) -> Priority {
        Priority(facility as u16 | level as u16)
    }
    /// Wrap a raw PRI value.
    pub fn from_raw(raw: u16) -> Priority {
        Priority(raw)
    }
    /// The raw PRI value, as it appears between angle brackets on the wire.
    pub fn raw(&self) -> u16 {
        self.0
    }
    /// The low three bits.
    pub fn severity(&self) -> Level {
        Level::from_severity((self.0 & SEVERITY_MASK) as u8)
    }
    /// The facility bits, still in their shifted position.
    pub fn facility_bits(&self) -> u16 {
        self.0 & FACILITY_MASK
    }
}

impl std::convert::From<Level> for Priority {
    fn from(level: Level) -> Priority {
        Priority(level as u16)
    }
}

impl std::convert::From<(Facility, Level)> for Priority {
    fn from(x: (Facility, Level)) -> Priority {
        Priority::new(x.0, x.1)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// What becomes of a priority handed to the client.
///
/// `mask` carries one bit per severity ([`Level::mask_bit`]); a record whose severity bit is
/// clear goes nowhere. `default_priority` supplies the facility for records logged with a bare
/// severity. Note that `LOG_KERN` is facility zero: a caller asking for `kern.notice` is
/// indistinguishable from one who supplied no facility at all, and picks up the default
/// facility like everybody else.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PriorityPolicy {
    pub default_priority: Priority,
    pub mask: u8,
}

impl std::default::Default for PriorityPolicy {
    /// Every severity passes; facility-less priorities stay in `LOG_KERN`.
    fn default() -> Self {
        PriorityPolicy {
            default_priority: Priority::new(Facility::LOG_KERN, Level::LOG_EMERG),
            mask: 0xff,
        }
    }
}

impl PriorityPolicy {
    /// Run one priority through the mask & the facility overlay.
    ///
    /// `None` means "suppressed". The mask is consulted _before_ the overlay, so it always
    /// judges the severity exactly as the caller gave it; a priority that clears the mask and
    /// carries no facility bits picks up `default_priority`'s facility, keeping its own
    /// severity.
    pub fn admit(&self, priority: Priority) -> Option<Priority> {
        let severity = priority.severity();
        if severity.mask_bit() & self.mask == 0 {
            return None;
        }
        if priority.facility_bits() == 0 {
            Some(Priority::from_raw(
                self.default_priority.facility_bits() | severity as u16,
            ))
        } else {
            Some(priority)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_priority_arithmetic() {
        let pri = Priority::new(Facility::LOG_MAIL, Level::LOG_NOTICE);
        assert_eq!(pri.raw(), 21);
        assert_eq!(pri.severity(), Level::LOG_NOTICE);
        assert_eq!(pri.facility_bits(), 16);
        assert_eq!(format!("{}", pri), "21");
        assert_eq!(Priority::from(Level::LOG_DEBUG).raw(), 7);
        assert_eq!(
            Priority::from((Facility::LOG_USER, Level::LOG_INFO)).raw(),
            14
        );
    }

    #[test]
    fn test_mask_sees_the_caller_severity() {
        // Only NOTICE gets through; facility bits must not perturb the verdict.
        let policy = PriorityPolicy {
            default_priority: Priority::new(Facility::LOG_LOCAL0, Level::LOG_EMERG),
            mask: Level::LOG_NOTICE.mask_bit(),
        };
        assert!(policy.admit(Priority::from(Level::LOG_NOTICE)).is_some());
        assert!(policy
            .admit(Priority::new(Facility::LOG_LOCAL7, Level::LOG_NOTICE))
            .is_some());
        assert!(policy.admit(Priority::from(Level::LOG_INFO)).is_none());
        assert!(policy
            .admit(Priority::new(Facility::LOG_LOCAL7, Level::LOG_INFO))
            .is_none());
    }

    #[test]
    fn test_default_facility_overlay() {
        let policy = PriorityPolicy {
            default_priority: Priority::new(Facility::LOG_LOCAL1, Level::LOG_EMERG),
            mask: 0xff,
        };
        // Facility-less: pick up LOG_LOCAL1, keep the severity.
        let p = policy.admit(Priority::from(Level::LOG_WARNING)).unwrap();
        assert_eq!(p, Priority::new(Facility::LOG_LOCAL1, Level::LOG_WARNING));
        // Facility present: left alone.
        let p = policy
            .admit(Priority::new(Facility::LOG_DAEMON, Level::LOG_WARNING))
            .unwrap();
        assert_eq!(p, Priority::new(Facility::LOG_DAEMON, Level::LOG_WARNING));
    }

    #[test]
    fn test_mask_is_exhaustively_severity_only() {
        // Every (severity, single-bit mask) pairing, with & without facility bits: the
        // verdict depends on the severity bit alone.
        for bit in 0..8u8 {
            let policy = PriorityPolicy {
                default_priority: Priority::new(Facility::LOG_LOCAL0, Level::LOG_EMERG),
                mask: 1 << bit,
            };
            for severity in 0..8u16 {
                let expected = severity == bit as u16;
                assert_eq!(
                    policy.admit(Priority::from_raw(severity)).is_some(),
                    expected
                );
                assert_eq!(
                    policy
                        .admit(Priority::from_raw(Facility::LOG_LOCAL5 as u16 | severity))
                        .is_some(),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_default_policy_admits_everything() {
        let policy = PriorityPolicy::default();
        for severity in 0..8u16 {
            assert!(policy.admit(Priority::from_raw(severity)).is_some());
        }
    }
}
