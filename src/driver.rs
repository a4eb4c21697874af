//! Ring controller.
//!
//! Composes the chain scanner with the pattern rotor and the rotation
//! countdown. The rotation timer is deliberately not synchronized with
//! frame completion: a rotation (or color write) landing mid-frame
//! applies to the elements not yet latched, and no more than that.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::pattern::{PatternRotor, PulseMode};
use crate::registers::{COLOR_RESET, RingRegisters, unpack_grb};
use crate::scanner::ChainScanner;
use crate::timing::{ConfigError, ProtocolTimings, TickTimer, duration_ticks};
use crate::{OutputLine, Rgb};

/// Construction-time configuration.
#[derive(Debug, Clone, Copy)]
pub struct RingConfig {
    /// Controller clock rate in Hz.
    pub clock_hz: u32,
    /// Number of chained elements.
    pub chain_len: u32,
    /// Single or double walking dot.
    pub mode: PulseMode,
    /// Pattern rotation period.
    pub rotation_period: Duration,
    /// Initial color.
    pub color: Rgb,
}

impl Default for RingConfig {
    /// The reference configuration: 24 MHz clock, 12 elements, single
    /// dot rotating every 50 ms.
    fn default() -> Self {
        Self {
            clock_hz: 24_000_000,
            chain_len: 12,
            mode: PulseMode::Single,
            rotation_period: Duration::from_millis(50),
            color: unpack_grb(COLOR_RESET),
        }
    }
}

/// Free-running ring controller, one clock tick per [`tick`] call.
///
/// The rotor and the scanner are two independent state machines sharing
/// only the registers, each field written by exactly one owner.
///
/// [`tick`]: RingController::tick
#[derive(Debug)]
pub struct RingController<'a> {
    scanner: ChainScanner<'a>,
    rotor: PatternRotor,
    rotation: TickTimer,
    registers: &'a RingRegisters,
    frames: u32,
}

impl<'a> RingController<'a> {
    /// Validate the configuration and build the controller.
    ///
    /// Seeds the color and pattern registers, so the first frame already
    /// carries the configured color.
    pub fn new(registers: &'a RingRegisters, config: &RingConfig) -> Result<Self, ConfigError> {
        let timings = ProtocolTimings::for_clock(config.clock_hz)?;
        let rotor = PatternRotor::new(config.chain_len, config.mode)?;
        let rotation = TickTimer::new(duration_ticks(config.rotation_period, config.clock_hz))?;
        let scanner = ChainScanner::new(registers, timings, config.chain_len)?;

        registers.set_rgb(config.color);
        registers.set_leds(rotor.mask());

        #[cfg(feature = "esp32-log")]
        println!(
            "ring controller: {} elements, {:?} dot, rotation every {} ticks",
            config.chain_len,
            config.mode,
            rotation.period()
        );

        Ok(Self {
            scanner,
            rotor,
            rotation,
            registers,
            frames: 0,
        })
    }

    /// Advance one clock tick; returns the line level for this tick.
    pub fn tick(&mut self) -> bool {
        if self.rotation.tick() {
            self.rotor.rotate();
            self.registers.set_leds(self.rotor.mask());
        }
        let step = self.scanner.tick();
        if step.done {
            self.frames = self.frames.wrapping_add(1);
        }
        step.high
    }

    /// Advance one clock tick and drive the wire.
    pub fn drive<L: OutputLine>(&mut self, line: &mut L) {
        let high = self.tick();
        line.set(high);
    }

    /// Completed frames since construction (wrapping).
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Shared registers, the runtime control surface.
    pub const fn registers(&self) -> &'a RingRegisters {
        self.registers
    }

    /// Current lit mask.
    pub const fn pattern(&self) -> u32 {
        self.rotor.mask()
    }
}
