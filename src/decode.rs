//! Wire decoder.
//!
//! Receiver-side rendition of the protocol: each pulse is classified by
//! its measured high time against the two nominal high times, words are
//! accumulated MSB-first and a frame closes when the line stays low for
//! longer than the gap threshold. Useful as a simulation sink and as
//! the measurement instrument in tests.

use heapless::Vec;

use crate::scanner::BITS_PER_ELEMENT;
use crate::timing::{ProtocolTimings, ticks};

/// A decoded frame: one 24-bit GRB word per element, in wire order.
pub type Frame<const MAX_LEDS: usize> = Vec<u32, MAX_LEDS>;

/// Low-run length treated as a frame gap (5 µs).
///
/// Well above any inter-bit low phase and well below the transmit-side
/// reset gap.
pub const GAP_DETECT_NS: u64 = 5_000;

/// Classification tolerance around the nominal high times (150 ns).
pub const PULSE_TOLERANCE_NS: u64 = 150;

/// Notable decoder observations, retained until read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeEvent {
    /// A high run matched neither nominal high time within tolerance.
    BadPulse { high_ticks: u32 },
    /// A frame gap arrived mid-word; the partial word was dropped.
    TruncatedWord { bits: u32 },
}

/// Tick-driven protocol decoder.
///
/// Feed it one line level per clock tick; completed frames are returned
/// from [`tick`](WireDecoder::tick). Words beyond `MAX_LEDS` in a frame
/// are dropped, mirroring a fixed-length receiver.
pub struct WireDecoder<const MAX_LEDS: usize> {
    t0h: u32,
    t1h: u32,
    tolerance: u32,
    gap_ticks: u32,
    high_run: u32,
    low_run: u32,
    word: u32,
    bits: u32,
    frame: Frame<MAX_LEDS>,
    last_event: Option<DecodeEvent>,
}

impl<const MAX_LEDS: usize> WireDecoder<MAX_LEDS> {
    pub fn new(timings: ProtocolTimings, clock_hz: u32) -> Self {
        Self {
            t0h: timings.t0h,
            t1h: timings.t1h,
            tolerance: ticks(PULSE_TOLERANCE_NS, clock_hz).max(1),
            gap_ticks: ticks(GAP_DETECT_NS, clock_hz).max(1),
            high_run: 0,
            low_run: 0,
            word: 0,
            bits: 0,
            frame: Vec::new(),
            last_event: None,
        }
    }

    /// Consume one line level; returns a frame when the gap closes one.
    pub fn tick(&mut self, high: bool) -> Option<Frame<MAX_LEDS>> {
        if high {
            self.high_run = self.high_run.saturating_add(1);
            self.low_run = 0;
            return None;
        }
        if self.high_run > 0 {
            // Falling edge: the completed high run carries the bit.
            self.classify_pulse();
            self.high_run = 0;
        }
        self.low_run = self.low_run.saturating_add(1);
        if self.low_run == self.gap_ticks {
            return self.close_frame();
        }
        None
    }

    /// Take the most recent observation, if any.
    pub fn take_event(&mut self) -> Option<DecodeEvent> {
        self.last_event.take()
    }

    fn classify_pulse(&mut self) {
        let run = self.high_run;
        let bit = if run.abs_diff(self.t0h) <= self.tolerance {
            false
        } else if run.abs_diff(self.t1h) <= self.tolerance {
            true
        } else {
            self.last_event = Some(DecodeEvent::BadPulse { high_ticks: run });
            // The nearest nominal still frames the stream.
            run.abs_diff(self.t1h) < run.abs_diff(self.t0h)
        };
        self.word = (self.word << 1) | u32::from(bit);
        self.bits += 1;
        if self.bits == BITS_PER_ELEMENT {
            let _ = self.frame.push(self.word);
            self.word = 0;
            self.bits = 0;
        }
    }

    fn close_frame(&mut self) -> Option<Frame<MAX_LEDS>> {
        if self.bits != 0 {
            self.last_event = Some(DecodeEvent::TruncatedWord { bits: self.bits });
            self.word = 0;
            self.bits = 0;
        }
        if self.frame.is_empty() {
            return None;
        }
        let mut done = Vec::new();
        core::mem::swap(&mut done, &mut self.frame);
        Some(done)
    }
}
