//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Clock pinned to an adjustable instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.now.write() {
            *now += delta;
        }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(reference_instant())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.read().map_or_else(|_| reference_instant(), |now| *now)
    }
}

/// 2026-03-02 10:00:00 UTC, a Monday morning.
pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0)
        .single()
        .unwrap_or_default()
}
