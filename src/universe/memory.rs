//! Resident memory of the seeding process, sampled between stages.

use indicatif::HumanBytes;
use std::fmt;
use sysinfo::{Pid, System};

const EXCELLENT_DELTA: i64 = 50 * 1024 * 1024;
const GOOD_DELTA: i64 = 100 * 1024 * 1024;

/// Tracks start and peak resident memory for one run.
///
/// Reads report zero when the platform does not expose this process.
pub struct MemoryTracker {
    system: System,
    pid: Option<Pid>,
    start: u64,
    peak: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySample {
    pub resident: u64,
    /// Highest resident value seen so far in the run
    pub peak: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub start: u64,
    pub end: u64,
    pub peak: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRating {
    Excellent,
    Good,
    High,
}

impl MemoryTracker {
    pub fn start() -> Self {
        let mut tracker = Self {
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
            start: 0,
            peak: 0,
        };
        tracker.start = tracker.resident();
        tracker.peak = tracker.start;
        tracker
    }

    pub fn start_bytes(&self) -> u64 {
        self.start
    }

    pub fn sample(&mut self) -> MemorySample {
        let resident = self.resident();
        self.peak = self.peak.max(resident);
        MemorySample {
            resident,
            peak: self.peak,
        }
    }

    pub fn finish(mut self) -> MemoryStats {
        let end = self.sample().resident;
        MemoryStats {
            start: self.start,
            end,
            peak: self.peak,
        }
    }

    fn resident(&mut self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };
        if !self.system.refresh_process(pid) {
            return 0;
        }
        self.system.process(pid).map_or(0, |process| process.memory())
    }
}

impl MemoryStats {
    /// Signed growth from the start of the run to its end
    pub fn delta(&self) -> i64 {
        self.end as i64 - self.start as i64
    }

    pub fn rating(&self) -> MemoryRating {
        match self.delta() {
            d if d < EXCELLENT_DELTA => MemoryRating::Excellent,
            d if d < GOOD_DELTA => MemoryRating::Good,
            _ => MemoryRating::High,
        }
    }
}

impl fmt::Display for MemoryRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryRating::Excellent => write!(f, "Excellent"),
            MemoryRating::Good => write!(f, "Good"),
            MemoryRating::High => write!(f, "High"),
        }
    }
}

/// Human-readable byte delta with an explicit sign
pub fn format_delta(delta: i64) -> String {
    let sign = if delta < 0 { "-" } else { "+" };
    format!("{}{}", sign, HumanBytes(delta.unsigned_abs()))
}
