//! Protocol timing derivation.
//!
//! Every timed phase of the wire protocol is expressed as a whole number
//! of controller clock ticks. The table is derived once at construction
//! and never recomputed per tick.

use core::fmt;

use embassy_time::Duration;

/// Zero-bit high time in nanoseconds.
pub const T0H_NS: u64 = 400;
/// Zero-bit low time in nanoseconds.
pub const T0L_NS: u64 = 850;
/// One-bit high time in nanoseconds.
pub const T1H_NS: u64 = 800;
/// One-bit low time in nanoseconds.
pub const T1L_NS: u64 = 450;
/// Reset/latch gap between frames in nanoseconds (75 µs).
pub const TRST_NS: u64 = 75_000;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Construction-time configuration errors.
///
/// Everything that can go wrong is rejected before the first tick;
/// runtime paths are infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A timed phase rounds to zero ticks at the given clock rate.
    ZeroTickTimer,
    /// Chain length is zero.
    EmptyChain,
    /// Chain length exceeds the pattern register width.
    ChainTooLong,
    /// Double-dot mode needs an even number of elements.
    OddDoubleChain,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTickTimer => write!(f, "timer duration rounds to zero ticks"),
            Self::EmptyChain => write!(f, "chain length must be at least 1"),
            Self::ChainTooLong => write!(f, "chain length exceeds pattern register width"),
            Self::OddDoubleChain => write!(f, "double-dot mode needs an even chain length"),
        }
    }
}

/// Whole-tick counts for every timed phase of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolTimings {
    /// Zero-bit high phase.
    pub t0h: u32,
    /// Zero-bit low phase.
    pub t0l: u32,
    /// One-bit high phase.
    pub t1h: u32,
    /// One-bit low phase.
    pub t1l: u32,
    /// Reset/latch gap between frames.
    pub reset: u32,
}

impl ProtocolTimings {
    /// Derive the timing table for a clock rate in Hz.
    ///
    /// Durations are rounded to the nearest whole tick. A clock too slow
    /// to express every phase in at least one tick is rejected: a
    /// zero-tick phase would degenerate into no pulse at all.
    pub fn for_clock(clock_hz: u32) -> Result<Self, ConfigError> {
        let table = Self {
            t0h: ticks(T0H_NS, clock_hz),
            t0l: ticks(T0L_NS, clock_hz),
            t1h: ticks(T1H_NS, clock_hz),
            t1l: ticks(T1L_NS, clock_hz),
            reset: ticks(TRST_NS, clock_hz),
        };
        if table.t0h == 0 || table.t0l == 0 || table.t1h == 0 || table.t1l == 0 || table.reset == 0
        {
            return Err(ConfigError::ZeroTickTimer);
        }
        Ok(table)
    }
}

/// Convert a duration in nanoseconds to whole clock ticks, rounding to
/// the nearest tick.
pub const fn ticks(nanos: u64, clock_hz: u32) -> u32 {
    ((nanos * clock_hz as u64 + NANOS_PER_SEC / 2) / NANOS_PER_SEC) as u32
}

/// Convert a [`Duration`] to whole clock ticks, rounding to the nearest
/// tick.
pub fn duration_ticks(period: Duration, clock_hz: u32) -> u32 {
    ticks(period.as_micros() * 1_000, clock_hz)
}

/// Free-running periodic countdown in clock ticks.
///
/// Fires for exactly one tick every `period` ticks and immediately
/// reloads, the software counterpart of a wait-timer wired to restart
/// itself.
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    period: u32,
    remaining: u32,
}

impl TickTimer {
    pub fn new(period: u32) -> Result<Self, ConfigError> {
        if period == 0 {
            return Err(ConfigError::ZeroTickTimer);
        }
        Ok(Self {
            period,
            remaining: period,
        })
    }

    /// Advance one clock tick; true on the tick the period elapses.
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.period;
            return true;
        }
        false
    }

    pub const fn period(&self) -> u32 {
        self.period
    }
}
