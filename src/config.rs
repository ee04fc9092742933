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
//! Client configuration: where to send, who we claim to be, what gets through.
//!
//! Everything the delivery machinery consults per call lives in one [`Config`] value: the client
//! holds it, reads it afresh on every log call, and exposes it for piecemeal mutation or
//! wholesale replacement between calls. There are no process-wide statics here-- two clients can
//! carry two entirely different configurations.

use crate::format::Protocol;
use crate::priority::{Priority, PriorityPolicy};

use std::net::IpAddr;

type StdResult<T, E> = std::result::Result<T, E>;

/// The collector's name or address.
///
/// RFC 3164 would rather see a name; a literal address is accepted everywhere a name is, with
/// one wrinkle: the reachability probe has nothing to `GET` from a bare address & falls back to
/// a well-known host (see [`probe_url`](crate::probe::probe_url)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Host {
    Name(String),
    Addr(IpAddr),
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        match self {
            Host::Name(name) => write!(f, "{}", name),
            Host::Addr(addr) => write!(f, "{}", addr),
        }
    }
}

/// Where datagrams go: a host plus a UDP port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: Host,
    pub port: u16,
}

impl Endpoint {
    pub fn name<S: Into<String>>(host: S, port: u16) -> Endpoint {
        Endpoint {
            host: Host::Name(host.into()),
            port,
        }
    }
    pub fn addr<A: Into<IpAddr>>(addr: A, port: u16) -> Endpoint {
        Endpoint {
            host: Host::Addr(addr.into()),
            port,
        }
    }
    /// A zero port can never carry syslog; the client treats it as "not configured".
    pub fn is_usable(&self) -> bool {
        self.port != 0
    }
}

/// The HOSTNAME & APP-NAME fields stamped on every outgoing line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub hostname: String,
    pub app_name: String,
}

impl std::default::Default for Identity {
    /// Both fields default to the NIL value; the wire formats render them as `-`.
    fn default() -> Self {
        Identity {
            hostname: String::from("-"),
            app_name: String::from("-"),
        }
    }
}

impl Identity {
    /// Attempt to discover an identity for this host.
    ///
    /// The hostname comes from [gethostname()], falling back to this host's IP address, falling
    /// back to the NIL value; the app name comes from the current executable. Discovery cannot
    /// fail-- a field that cannot be determined simply stays NIL.
    ///
    /// [gethostname()]: https://man7.org/linux/man-pages/man2/gethostname.2.html
    pub fn local() -> Identity {
        // `hostname::get()` returns an `Result<OsString,_>`, which is really kind of a hassle
        // to work with...
        let hostname = hostname::get()
            .ok()
            .and_then(|hn| hn.into_string().ok())
            .or_else(|| local_ip_address::local_ip().ok().map(|ip| ip.to_string()))
            .unwrap_or_else(|| String::from("-"));
        let app_name = std::env::current_exe()
            .ok()
            .and_then(|pbuf| {
                pbuf.file_name()
                    .map(|os_str| os_str.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| String::from("-"));
        Identity { hostname, app_name }
    }
}

/// One client's complete configuration.
///
/// Every field may be changed between log calls-- each call reads the value current at that
/// moment. The protocol alone has no piecemeal setter: lines already in the spool were rendered
/// under it, and a replay would mix formats if it drifted mid-life. It changes only when the
/// whole configuration is replaced.
#[derive(Clone, Debug)]
pub struct Config {
    /// Unset until the caller names a collector; nothing can be sent or spooled without one.
    pub endpoint: Option<Endpoint>,
    pub identity: Identity,
    pub policy: PriorityPolicy,
    /// Line format; see [`Protocol`].
    pub protocol: Protocol,
    /// Mirror every record to the console collaborator, ahead of any filtering.
    pub echo: bool,
}

impl std::default::Default for Config {
    fn default() -> Self {
        Config {
            endpoint: None,
            identity: Identity::default(),
            policy: PriorityPolicy::default(),
            protocol: Protocol::default(),
            echo: false,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            imp: Config::default(),
        }
    }
}

/// Fluent construction of a [`Config`].
pub struct ConfigBuilder {
    imp: Config,
}

impl ConfigBuilder {
    /// Name the collector.
    pub fn server<S: Into<String>>(mut self, host: S, port: u16) -> Self {
        self.imp.endpoint = Some(Endpoint::name(host, port));
        self
    }
    /// Point at the collector by literal address.
    pub fn server_addr<A: Into<IpAddr>>(mut self, addr: A, port: u16) -> Self {
        self.imp.endpoint = Some(Endpoint::addr(addr, port));
        self
    }
    pub fn device_hostname<S: Into<String>>(mut self, hostname: S) -> Self {
        self.imp.identity.hostname = hostname.into();
        self
    }
    pub fn app_name<S: Into<String>>(mut self, app_name: S) -> Self {
        self.imp.identity.app_name = app_name.into();
        self
    }
    pub fn identity(mut self, identity: Identity) -> Self {
        self.imp.identity = identity;
        self
    }
    /// The priority overlaid on facility-less records.
    pub fn default_priority<P: Into<Priority>>(mut self, priority: P) -> Self {
        self.imp.policy.default_priority = priority.into();
        self
    }
    /// One bit per severity; see [`Level::mask_bit`](crate::facility::Level::mask_bit).
    pub fn log_mask(mut self, mask: u8) -> Self {
        self.imp.policy.mask = mask;
        self
    }
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.imp.protocol = protocol;
        self
    }
    pub fn echo(mut self, echo: bool) -> Self {
        self.imp.echo = echo;
        self
    }
    pub fn build(self) -> Config {
        self.imp
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facility::{Facility, Level};

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(cfg.endpoint.is_none());
        assert_eq!(cfg.identity.hostname, "-");
        assert_eq!(cfg.identity.app_name, "-");
        assert_eq!(cfg.policy.mask, 0xff);
        assert_eq!(cfg.protocol, Protocol::Rfc5424);
        assert!(!cfg.echo);
    }

    #[test]
    fn test_builder() {
        let cfg = Config::builder()
            .server("logs.pwpinfra.com", 514)
            .device_hostname("bree")
            .app_name("lamp")
            .default_priority(Priority::new(Facility::LOG_LOCAL0, Level::LOG_EMERG))
            .log_mask(0x7f)
            .protocol(Protocol::Rfc3164)
            .echo(true)
            .build();
        assert_eq!(cfg.endpoint, Some(Endpoint::name("logs.pwpinfra.com", 514)));
        assert_eq!(cfg.identity.hostname, "bree");
        assert_eq!(cfg.identity.app_name, "lamp");
        assert_eq!(
            cfg.policy.default_priority,
            Priority::new(Facility::LOG_LOCAL0, Level::LOG_EMERG)
        );
        assert_eq!(cfg.policy.mask, 0x7f);
        assert_eq!(cfg.protocol, Protocol::Rfc3164);
        assert!(cfg.echo);
    }

    #[test]
    fn test_zero_port_is_unusable() {
        assert!(!Endpoint::name("logs.pwpinfra.com", 0).is_usable());
        assert!(Endpoint::addr(std::net::Ipv4Addr::new(192, 168, 1, 5), 514).is_usable());
    }

    #[test]
    fn test_local_identity() {
        let id = Identity::local(); // At least _exercise_ it
        assert!(!id.hostname.is_empty());
        assert!(!id.app_name.is_empty());
    }
}
