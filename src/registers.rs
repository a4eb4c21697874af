//! Shared control registers.
//!
//! The crate-side stand-in for a memory-mapped control plane: plain
//! values behind critical sections with single-writer discipline. The
//! control plane and the pattern rotor write, the chain scanner only
//! reads. Oversized writes are truncated to the register width,
//! matching hardware bus semantics.

use core::cell::Cell;

use critical_section::Mutex;

use crate::Rgb;

/// Width mask of the 24-bit color register.
pub const COLOR_MASK: u32 = 0x00FF_FFFF;

/// Reset value of the color register (dim green in GRB).
pub const COLOR_RESET: u32 = 0x0040_0000;

/// Pack an [`Rgb`] into the 24-bit GRB wire word.
pub const fn pack_grb(color: Rgb) -> u32 {
    ((color.g as u32) << 16) | ((color.r as u32) << 8) | color.b as u32
}

/// Unpack a 24-bit GRB wire word into an [`Rgb`].
pub const fn unpack_grb(word: u32) -> Rgb {
    Rgb {
        r: ((word >> 8) & 0xFF) as u8,
        g: ((word >> 16) & 0xFF) as u8,
        b: (word & 0xFF) as u8,
    }
}

/// One shared register cell.
///
/// Reads and writes each complete within one critical section; there is
/// no wider transactional guarantee.
#[derive(Debug)]
struct Reg(Mutex<Cell<u32>>);

impl Reg {
    const fn new(reset: u32) -> Self {
        Self(Mutex::new(Cell::new(reset)))
    }

    fn read(&self) -> u32 {
        critical_section::with(|cs| self.0.borrow(cs).get())
    }

    fn write(&self, value: u32) {
        critical_section::with(|cs| self.0.borrow(cs).set(value));
    }
}

/// Control registers shared between the control plane, the pattern
/// rotor and the chain scanner.
#[derive(Debug)]
pub struct RingRegisters {
    color: Reg,
    leds: Reg,
}

impl RingRegisters {
    pub const fn new() -> Self {
        Self {
            color: Reg::new(COLOR_RESET),
            leds: Reg::new(0),
        }
    }

    /// Current 24-bit GRB color word.
    pub fn color(&self) -> u32 {
        self.color.read()
    }

    /// Write the color word; bits above 24 are dropped.
    ///
    /// The scanner latches this value once per element, so a write
    /// mid-frame only affects elements not yet latched.
    pub fn set_color(&self, word: u32) {
        self.color.write(word & COLOR_MASK);
    }

    /// Write the color from an [`Rgb`] value.
    pub fn set_rgb(&self, color: Rgb) {
        self.set_color(pack_grb(color));
    }

    /// Current pattern mask.
    pub fn leds(&self) -> u32 {
        self.leds.read()
    }

    /// Write the pattern mask.
    ///
    /// The scanner truncates the value to its chain window when
    /// latching at the start of each frame.
    pub fn set_leds(&self, mask: u32) {
        self.leds.write(mask);
    }
}

impl Default for RingRegisters {
    fn default() -> Self {
        Self::new()
    }
}
