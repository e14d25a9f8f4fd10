use std::iter::Sum;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// The counter pair reported for a country (or for the whole world) and the
/// derived `all` value.
///
/// `all` is always `awaiting_peers - used_ports`. It is never taken from the
/// input: the fields are private and can only be written as a pair, so the
/// derived value is recomputed on every mutation and on every decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawCounters", rename_all = "camelCase")]
pub struct Counters {
    awaiting_peers: u32,
    used_ports: u32,
    all: i64,
}

/// Wire shape. An incoming `all` field is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCounters {
    awaiting_peers: u32,
    used_ports: u32,
}

impl From<RawCounters> for Counters {
    fn from(raw: RawCounters) -> Self {
        Self::new(raw.awaiting_peers, raw.used_ports)
    }
}

impl Counters {
    #[must_use]
    pub fn new(awaiting_peers: u32, used_ports: u32) -> Self {
        Self {
            awaiting_peers,
            used_ports,
            all: derive_all(awaiting_peers, used_ports),
        }
    }

    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Overwrites both counters in place and recomputes `all`.
    pub fn set(&mut self, awaiting_peers: u32, used_ports: u32) {
        self.awaiting_peers = awaiting_peers;
        self.used_ports = used_ports;
        self.all = derive_all(awaiting_peers, used_ports);
    }

    /// Copies the values of `other` into `self` without replacing `self`.
    pub fn assign(&mut self, other: &Counters) {
        self.set(other.awaiting_peers, other.used_ports);
    }

    pub fn reset(&mut self) {
        self.set(0, 0);
    }

    #[must_use]
    pub fn awaiting_peers(&self) -> u32 {
        self.awaiting_peers
    }

    #[must_use]
    pub fn used_ports(&self) -> u32 {
        self.used_ports
    }

    #[must_use]
    pub fn all(&self) -> i64 {
        self.all
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.awaiting_peers == 0 && self.used_ports == 0
    }

    /// The value displayed for `metric`.
    #[must_use]
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::All => self.all,
            Metric::AwaitingPeers => i64::from(self.awaiting_peers),
            Metric::UsedPorts => i64::from(self.used_ports),
        }
    }
}

fn derive_all(awaiting_peers: u32, used_ports: u32) -> i64 {
    i64::from(awaiting_peers) - i64::from(used_ports)
}

impl AddAssign for Counters {
    fn add_assign(&mut self, rhs: Self) {
        self.set(
            self.awaiting_peers.saturating_add(rhs.awaiting_peers),
            self.used_ports.saturating_add(rhs.used_ports),
        );
    }
}

impl<'a> Sum<&'a Counters> for Counters {
    fn sum<I: Iterator<Item = &'a Counters>>(iter: I) -> Self {
        iter.fold(Counters::zeroed(), |mut acc, counters| {
            acc += *counters;
            acc
        })
    }
}
