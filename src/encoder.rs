//! Single-bit pulse encoder.
//!
//! Encodes one logical bit as a timed high/low pulse pair on the wire.
//! A pulse, once started, always runs to completion: cancelling mid-bit
//! would corrupt the receiver's bit framing.

use crate::timing::ProtocolTimings;

/// Output of one encoder tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseStep {
    /// Line level for this tick.
    pub high: bool,
    /// Set on the final tick of the low phase.
    pub done: bool,
}

#[derive(Debug, Clone, Copy)]
enum EncoderState {
    Idle,
    High { remaining: u32, low: u32 },
    Low { remaining: u32 },
}

/// Encodes single bits as protocol pulses, one clock tick per [`tick`]
/// call.
///
/// [`tick`]: BitEncoder::tick
#[derive(Debug)]
pub struct BitEncoder {
    timings: ProtocolTimings,
    state: EncoderState,
}

impl BitEncoder {
    pub const fn new(timings: ProtocolTimings) -> Self {
        Self {
            timings,
            state: EncoderState::Idle,
        }
    }

    /// True when no pulse is in flight.
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, EncoderState::Idle)
    }

    /// Arm the encoder with the next bit value.
    ///
    /// Must only be called while idle. A pulse in flight is never
    /// replaced; the wire contract forbids it.
    pub fn start(&mut self, bit: bool) {
        debug_assert!(self.is_idle());
        if !self.is_idle() {
            return;
        }
        let (high, low) = if bit {
            (self.timings.t1h, self.timings.t1l)
        } else {
            (self.timings.t0h, self.timings.t0l)
        };
        self.state = EncoderState::High {
            remaining: high,
            low,
        };
    }

    /// Advance one clock tick and report the line level.
    ///
    /// Ticking while idle holds the line low.
    pub fn tick(&mut self) -> PulseStep {
        match self.state {
            EncoderState::Idle => PulseStep {
                high: false,
                done: false,
            },
            EncoderState::High { remaining, low } => {
                let remaining = remaining - 1;
                self.state = if remaining == 0 {
                    EncoderState::Low { remaining: low }
                } else {
                    EncoderState::High { remaining, low }
                };
                PulseStep {
                    high: true,
                    done: false,
                }
            }
            EncoderState::Low { remaining } => {
                let remaining = remaining - 1;
                if remaining == 0 {
                    self.state = EncoderState::Idle;
                    return PulseStep {
                        high: false,
                        done: true,
                    };
                }
                self.state = EncoderState::Low { remaining };
                PulseStep {
                    high: false,
                    done: false,
                }
            }
        }
    }
}
