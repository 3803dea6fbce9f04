use crate::reports::ReportTable;
use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[cfg(any(test, feature = "testing-api"))]
pub struct ManualClock {
    now: std::cell::Cell<Instant>,
}

#[cfg(any(test, feature = "testing-api"))]
impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: std::cell::Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(any(test, feature = "testing-api"))]
impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing-api"))]
impl Clock for &ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Report results keyed by report title.
///
/// Entries do not expire one by one: once the TTL has passed since the
/// last clear, the next lookup empties the whole cache.
pub struct ReportCache<C: Clock = SystemClock> {
    entries: HashMap<String, ReportTable>,
    ttl: Duration,
    last_cleared: Instant,
    clock: C,
}

impl ReportCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> ReportCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        let last_cleared = clock.now();
        ReportCache {
            entries: HashMap::new(),
            ttl,
            last_cleared,
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, key: &str) -> Option<&ReportTable> {
        self.refresh();
        let hit = self.entries.get(key);
        debug!("cache {} for '{}'", if hit.is_some() { "hit" } else { "miss" }, key);
        hit
    }

    pub fn put(&mut self, key: &str, table: ReportTable) {
        self.entries.insert(key.to_string(), table);
    }

    fn refresh(&mut self) {
        let now = self.clock.now();
        if now.duration_since(self.last_cleared) > self.ttl {
            if !self.entries.is_empty() {
                debug!("cache expired, dropping {} report(s)", self.entries.len());
            }
            self.entries.clear();
            self.last_cleared = now;
        }
    }
}
