//! Walking-pattern rotor.
//!
//! Owns the lit-element mask: one bit in single-dot mode, two
//! diametrically opposed bits in double-dot mode. Element 0 (the first
//! one on the wire) maps to the top bit of the chain window, so
//! rotating the mask left walks the dot around the ring.

use crate::timing::ConfigError;

/// Widest supported chain; the pattern mask lives in a `u32`.
pub const MAX_CHAIN_LEN: u32 = 32;

/// Mask of the low `chain_len` bits.
pub(crate) const fn chain_window(chain_len: u32) -> u32 {
    if chain_len >= 32 {
        u32::MAX
    } else {
        (1 << chain_len) - 1
    }
}

/// How many elements each pattern bit lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseMode {
    /// One lit element walking the chain.
    Single,
    /// Two lit elements half a chain apart, walking together.
    Double,
}

/// Rotating lit-element mask.
#[derive(Debug, Clone)]
pub struct PatternRotor {
    mask: u32,
    chain_len: u32,
}

impl PatternRotor {
    /// Element 0 starts lit; in double-dot mode the element half a
    /// chain away is lit as well.
    pub fn new(chain_len: u32, mode: PulseMode) -> Result<Self, ConfigError> {
        if chain_len == 0 {
            return Err(ConfigError::EmptyChain);
        }
        if chain_len > MAX_CHAIN_LEN {
            return Err(ConfigError::ChainTooLong);
        }
        let top = 1u32 << (chain_len - 1);
        let mask = match mode {
            PulseMode::Single => top,
            PulseMode::Double => {
                if chain_len % 2 != 0 {
                    return Err(ConfigError::OddDoubleChain);
                }
                top | (top >> (chain_len / 2))
            }
        };
        Ok(Self { mask, chain_len })
    }

    /// Current lit mask, element 0 at the top bit of the window.
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    pub const fn chain_len(&self) -> u32 {
        self.chain_len
    }

    /// Rotate the lit mask left by one position, the top bit of the
    /// window wrapping back to the bottom.
    pub fn rotate(&mut self) {
        let top = 1u32 << (self.chain_len - 1);
        let carry = u32::from(self.mask & top != 0);
        self.mask = ((self.mask << 1) & chain_window(self.chain_len)) | carry;
    }
}
