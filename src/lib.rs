#![no_std]

pub mod decode;
pub mod driver;
pub mod encoder;
pub mod pattern;
pub mod registers;
pub mod scanner;
pub mod timing;

pub use decode::{DecodeEvent, Frame, WireDecoder};
pub use driver::{RingConfig, RingController};
pub use encoder::{BitEncoder, PulseStep};
pub use pattern::{PatternRotor, PulseMode};
pub use registers::{RingRegisters, pack_grb, unpack_grb};
pub use scanner::{BITS_PER_ELEMENT, ChainScanner, ScanStep};
pub use timing::{ConfigError, ProtocolTimings, TickTimer};

pub use embassy_time::Duration;
pub use smart_leds::RGB8 as Rgb;

/// Abstract single-wire output
///
/// Implement this trait to connect the controller to a GPIO pin.
/// The controller is generic over this trait and drives exactly one
/// level per clock tick.
pub trait OutputLine {
    /// Drive the wire to the given level for the current clock tick
    fn set(&mut self, high: bool);
}
