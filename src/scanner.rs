//! Chain scanner state machine.
//!
//! Walks the whole chain once per frame: a reset/latch gap, then 24
//! bit-pulses per element. Lit elements carry the color word, dark
//! elements a zero word; every element still receives a full word,
//! since each one consumes 24 bits before passing data through to its
//! neighbour.
//!
//! The pattern mask is latched once per frame at the end of the reset
//! gap, the color word once per element. A color write therefore lands
//! on a word boundary at the earliest; it never tears a word in flight.

use crate::encoder::BitEncoder;
use crate::pattern::chain_window;
use crate::registers::{COLOR_MASK, RingRegisters};
use crate::timing::{ConfigError, ProtocolTimings};

/// Bits per element word.
pub const BITS_PER_ELEMENT: u32 = 24;

/// Output of one scanner tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    /// Line level for this tick.
    pub high: bool,
    /// One-tick pulse after the last element of a frame.
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Reset,
    LedSelect,
    BitTest,
    SendZero,
    SendOne,
    BitShift,
}

/// Per-frame chain scanner, one state transition per clock tick.
///
/// Reads the pattern and color registers, drives a [`BitEncoder`] for
/// each bit and reports the line level per tick. There are no runtime
/// error states: a started frame always runs to completion.
#[derive(Debug)]
pub struct ChainScanner<'a> {
    registers: &'a RingRegisters,
    encoder: BitEncoder,
    chain_len: u32,
    state: ScanState,
    reset_ticks: u32,
    reset_remaining: u32,
    /// Pattern shift register, element 0 at the top bit.
    led: u32,
    /// 24-bit data shift register for the current element.
    data: u32,
    led_count: u32,
    bit_count: u32,
}

impl<'a> ChainScanner<'a> {
    pub fn new(
        registers: &'a RingRegisters,
        timings: ProtocolTimings,
        chain_len: u32,
    ) -> Result<Self, ConfigError> {
        if chain_len == 0 {
            return Err(ConfigError::EmptyChain);
        }
        if chain_len > crate::pattern::MAX_CHAIN_LEN {
            return Err(ConfigError::ChainTooLong);
        }
        // Reject hand-built tables with zero-tick phases; a zero-tick
        // countdown has no well-defined pulse.
        if timings.t0h == 0
            || timings.t0l == 0
            || timings.t1h == 0
            || timings.t1l == 0
            || timings.reset == 0
        {
            return Err(ConfigError::ZeroTickTimer);
        }
        Ok(Self {
            registers,
            encoder: BitEncoder::new(timings),
            chain_len,
            state: ScanState::Reset,
            reset_ticks: timings.reset,
            reset_remaining: timings.reset,
            led: 0,
            data: 0,
            led_count: 0,
            bit_count: 0,
        })
    }

    pub const fn chain_len(&self) -> u32 {
        self.chain_len
    }

    const fn top_led_bit(&self) -> u32 {
        1 << (self.chain_len - 1)
    }

    /// Advance one clock tick.
    pub fn tick(&mut self) -> ScanStep {
        match self.state {
            ScanState::Reset => {
                self.reset_remaining -= 1;
                if self.reset_remaining == 0 {
                    self.led = self.registers.leds() & chain_window(self.chain_len);
                    self.led_count = 0;
                    self.state = ScanState::LedSelect;
                }
                ScanStep {
                    high: false,
                    done: false,
                }
            }
            ScanState::LedSelect => {
                if self.led_count == self.chain_len {
                    self.reset_remaining = self.reset_ticks;
                    self.state = ScanState::Reset;
                    return ScanStep {
                        high: false,
                        done: true,
                    };
                }
                self.data = if self.led & self.top_led_bit() != 0 {
                    self.registers.color() & COLOR_MASK
                } else {
                    0
                };
                self.bit_count = BITS_PER_ELEMENT;
                self.led = (self.led << 1) & chain_window(self.chain_len);
                self.led_count += 1;
                self.state = ScanState::BitTest;
                ScanStep {
                    high: false,
                    done: false,
                }
            }
            ScanState::BitTest => {
                let bit = self.data & (1 << (BITS_PER_ELEMENT - 1)) != 0;
                self.encoder.start(bit);
                self.state = if bit {
                    ScanState::SendOne
                } else {
                    ScanState::SendZero
                };
                ScanStep {
                    high: false,
                    done: false,
                }
            }
            ScanState::SendZero | ScanState::SendOne => {
                let step = self.encoder.tick();
                if step.done {
                    self.state = ScanState::BitShift;
                }
                ScanStep {
                    high: step.high,
                    done: false,
                }
            }
            ScanState::BitShift => {
                self.data = (self.data << 1) & COLOR_MASK;
                self.bit_count -= 1;
                self.state = if self.bit_count == 0 {
                    ScanState::LedSelect
                } else {
                    ScanState::BitTest
                };
                ScanStep {
                    high: false,
                    done: false,
                }
            }
        }
    }
}
