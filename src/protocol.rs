//! TLC5940 serial protocol
//!
//! The chip chain is fed over a bit-banged link: SIN carries the next bit and
//! is sampled on every rising SCLK edge. Dot correction takes 6 bits per
//! channel with VPRG high, grayscale 12 bits per channel with VPRG low. Both
//! are sent most significant bit first, starting from the last channel of the
//! last chip in the chain.
//!
//! Shifted grayscale data only takes effect when XLAT is pulsed, which must
//! happen between two grayscale cycles. [`Tlc5940::split`] therefore hands
//! the data pins to a [`GrayscaleWriter`] owned by the control loop and the
//! latch pins to a [`CycleHandler`] run from the cycle timer interrupt. The
//! two meet only through a [`LatchFlag`].

use core::fmt;

use embedded_hal::digital::{Error, ErrorKind, OutputPin};
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::gamma::pwm_value;
use crate::latch::{CycleHandler, LatchFlag};

/// Channels driven by one chip
pub const CHANNELS_PER_CHIP: usize = 16;

/// Legs (color channels) per fixture
pub const LEGS: usize = 3;

const DOT_CORRECTION_BITS: u32 = 6;
const DOT_CORRECTION_MASK: u8 = 0x3F;
const GRAYSCALE_BITS: u32 = 12;

/// Signal a pin drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    /// SIN, serial data
    Data,
    /// SCLK, serial clock
    Clock,
    /// VPRG, dot correction / grayscale mode select
    Mode,
    /// XLAT, register latch
    Latch,
    /// BLANK, output disable and grayscale counter reset
    Blank,
    /// GSCLK gate
    GrayscaleClock,
}

impl PinRole {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Data => "SIN",
            Self::Clock => "SCLK",
            Self::Mode => "VPRG",
            Self::Latch => "XLAT",
            Self::Blank => "BLANK",
            Self::GrayscaleClock => "GSCLK",
        }
    }
}

/// A pin operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinError {
    pub role: PinRole,
    pub kind: ErrorKind,
}

impl PinError {
    pub const fn new(role: PinRole, kind: ErrorKind) -> Self {
        Self { role, kind }
    }
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pin failed: {}", self.role.name(), self.kind)
    }
}

impl Error for PinError {
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Output pin tagged with the signal it drives, so failures name it
pub(crate) struct SignalPin<P> {
    pin: P,
    role: PinRole,
}

impl<P: OutputPin> SignalPin<P> {
    pub(crate) const fn new(pin: P, role: PinRole) -> Self {
        Self { pin, role }
    }

    pub(crate) fn set_high(&mut self) -> Result<(), PinError> {
        let role = self.role;
        self.pin
            .set_high()
            .map_err(|err| PinError::new(role, err.kind()))
    }

    pub(crate) fn set_low(&mut self) -> Result<(), PinError> {
        let role = self.role;
        self.pin
            .set_low()
            .map_err(|err| PinError::new(role, err.kind()))
    }

    pub(crate) fn set_level(&mut self, high: bool) -> Result<(), PinError> {
        if high { self.set_high() } else { self.set_low() }
    }

    /// High then low
    pub(crate) fn pulse(&mut self) -> Result<(), PinError> {
        self.set_high()?;
        self.set_low()
    }

    pub(crate) fn release(self) -> P {
        self.pin
    }
}

/// Gate for the free-running grayscale clock.
///
/// The clock frequency never changes; it is only let through or held back
/// around a latch.
pub trait ClockGate {
    /// Let GSCLK reach the chip
    fn enable(&mut self) -> Result<(), PinError>;
    /// Hold GSCLK back
    fn disable(&mut self) -> Result<(), PinError>;
}

/// [`ClockGate`] driving an enable line, high to let the clock through
pub struct PinGate<P> {
    pin: SignalPin<P>,
}

impl<P: OutputPin> PinGate<P> {
    pub const fn new(pin: P) -> Self {
        Self {
            pin: SignalPin::new(pin, PinRole::GrayscaleClock),
        }
    }

    pub fn release(self) -> P {
        self.pin.release()
    }
}

impl<P: OutputPin> ClockGate for PinGate<P> {
    fn enable(&mut self) -> Result<(), PinError> {
        self.pin.set_high()
    }

    fn disable(&mut self) -> Result<(), PinError> {
        self.pin.set_low()
    }
}

/// Which leg of a fixture drives which color
///
/// Channel `3 * fixture + leg` is the `leg`-th output of that fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegOrder {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
}

impl Default for LegOrder {
    fn default() -> Self {
        Self {
            red: 2,
            green: 1,
            blue: 0,
        }
    }
}

impl LegOrder {
    /// Pick the component of `[red, green, blue]` wired to `leg`.
    ///
    /// Legs not named by the order get 0.
    pub const fn select(&self, leg: usize, [red, green, blue]: [u8; 3]) -> u8 {
        if leg == self.red {
            red
        } else if leg == self.green {
            green
        } else if leg == self.blue {
            blue
        } else {
            0
        }
    }

    /// Brightness of `channel` given the colors of every fixture.
    ///
    /// Channels past the last fixture are dark.
    pub fn channel_level(&self, fixtures: &[Rgb], channel: usize) -> u8 {
        fixtures
            .get(channel / LEGS)
            .map(|color| self.select(channel % LEGS, [color.r, color.g, color.b]))
            .unwrap_or(0)
    }
}

/// Per-color output current, as 6-bit dot correction values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotCorrection {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for DotCorrection {
    fn default() -> Self {
        Self {
            red: 27,
            green: 16,
            blue: 21,
        }
    }
}

impl DotCorrection {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Dot correction value sent for `channel`, masked to 6 bits
    pub const fn channel_value(self, legs: &LegOrder, channel: usize) -> u8 {
        legs.select(channel % LEGS, [self.red, self.green, self.blue]) & DOT_CORRECTION_MASK
    }
}

/// SIN and SCLK
struct SerialLink<SIN, SCLK> {
    data: SignalPin<SIN>,
    clock: SignalPin<SCLK>,
}

impl<SIN: OutputPin, SCLK: OutputPin> SerialLink<SIN, SCLK> {
    /// Shift the low `bits` bits of `value`, most significant first.
    ///
    /// Leaves SCLK low.
    fn shift(&mut self, value: u16, bits: u32) -> Result<(), PinError> {
        for bit in (0..bits).rev() {
            self.clock.set_low()?;
            self.data.set_level((value >> bit) & 1 != 0)?;
            self.clock.set_high()?;
        }
        self.clock.set_low()
    }
}

/// Pins wired to the chip chain
pub struct Tlc5940Pins<SIN, SCLK, VPRG, XLAT, BLANK, GS> {
    pub sin: SIN,
    pub sclk: SCLK,
    pub vprg: VPRG,
    pub xlat: XLAT,
    pub blank: BLANK,
    pub gsclk: GS,
}

/// A chain of TLC5940 chips with `CHANNELS` outputs in total
pub struct Tlc5940<SIN, SCLK, VPRG, XLAT, BLANK, GS, const CHANNELS: usize> {
    link: SerialLink<SIN, SCLK>,
    mode: SignalPin<VPRG>,
    latch: SignalPin<XLAT>,
    blank: SignalPin<BLANK>,
    gate: GS,
    legs: LegOrder,
}

impl<SIN, SCLK, VPRG, XLAT, BLANK, GS, const CHANNELS: usize>
    Tlc5940<SIN, SCLK, VPRG, XLAT, BLANK, GS, CHANNELS>
where
    SIN: OutputPin,
    SCLK: OutputPin,
    VPRG: OutputPin,
    XLAT: OutputPin,
    BLANK: OutputPin,
    GS: ClockGate,
{
    pub fn new(pins: Tlc5940Pins<SIN, SCLK, VPRG, XLAT, BLANK, GS>, legs: LegOrder) -> Self {
        const {
            assert!(
                CHANNELS > 0 && CHANNELS % CHANNELS_PER_CHIP == 0,
                "CHANNELS must be a non-zero multiple of 16"
            );
        }
        Self {
            link: SerialLink {
                data: SignalPin::new(pins.sin, PinRole::Data),
                clock: SignalPin::new(pins.sclk, PinRole::Clock),
            },
            mode: SignalPin::new(pins.vprg, PinRole::Mode),
            latch: SignalPin::new(pins.xlat, PinRole::Latch),
            blank: SignalPin::new(pins.blank, PinRole::Blank),
            gate: pins.gsclk,
            legs,
        }
    }

    /// Number of chips in the chain
    pub const fn chips(&self) -> usize {
        CHANNELS / CHANNELS_PER_CHIP
    }

    /// Drive every line to its idle level with outputs blanked
    pub fn begin(&mut self) -> Result<(), PinError> {
        self.blank.set_high()?;
        self.gate.disable()?;
        self.latch.set_low()?;
        self.mode.set_low()?;
        self.link.data.set_low()?;
        self.link.clock.set_low()
    }

    /// Shift and latch dot correction for every channel.
    ///
    /// The chip needs one extra SCLK pulse after a dot correction latch
    /// before grayscale data is accepted again.
    pub fn program_dot_correction(&mut self, currents: DotCorrection) -> Result<(), PinError> {
        #[cfg(feature = "esp32-log")]
        println!(
            "[Tlc5940.program_dot_correction] r={} g={} b={} channels={}",
            currents.red,
            currents.green,
            currents.blue,
            CHANNELS
        );

        self.mode.set_high()?;
        for channel in (0..CHANNELS).rev() {
            let value = currents.channel_value(&self.legs, channel);
            self.link.shift(u16::from(value), DOT_CORRECTION_BITS)?;
        }
        self.latch.pulse()?;
        self.mode.set_low()?;
        self.link.clock.pulse()
    }

    /// Hand the data pins to the control loop and the latch pins to the
    /// cycle interrupt
    pub fn split(
        self,
        flag: &LatchFlag,
    ) -> (
        GrayscaleWriter<'_, SIN, SCLK, VPRG, CHANNELS>,
        CycleHandler<'_, XLAT, BLANK, GS>,
    ) {
        let writer = GrayscaleWriter {
            link: self.link,
            mode: self.mode,
            legs: self.legs,
            flag,
        };
        let handler = CycleHandler::new(self.latch, self.blank, self.gate, flag);
        (writer, handler)
    }
}

/// Control-loop half of the driver: shifts grayscale frames
pub struct GrayscaleWriter<'a, SIN, SCLK, VPRG, const CHANNELS: usize> {
    link: SerialLink<SIN, SCLK>,
    mode: SignalPin<VPRG>,
    legs: LegOrder,
    flag: &'a LatchFlag,
}

impl<SIN, SCLK, VPRG, const CHANNELS: usize> GrayscaleWriter<'_, SIN, SCLK, VPRG, CHANNELS>
where
    SIN: OutputPin,
    SCLK: OutputPin,
    VPRG: OutputPin,
{
    pub const fn legs(&self) -> LegOrder {
        self.legs
    }

    /// Shift one frame and mark it for latching at the next cycle boundary.
    ///
    /// Each channel is sent as the 12-bit drive value of its brightness.
    /// A frame that was not latched yet is overwritten.
    pub fn write_grayscale(&mut self, fixtures: &[Rgb]) -> Result<(), PinError> {
        self.mode.set_low()?;
        for channel in (0..CHANNELS).rev() {
            let level = self.legs.channel_level(fixtures, channel);
            self.link.shift(pwm_value(level), GRAYSCALE_BITS)?;
        }
        self.flag.publish();
        Ok(())
    }
}

impl<SIN, SCLK, VPRG, const CHANNELS: usize> OutputDriver
    for GrayscaleWriter<'_, SIN, SCLK, VPRG, CHANNELS>
where
    SIN: OutputPin,
    SCLK: OutputPin,
    VPRG: OutputPin,
{
    type Error = PinError;

    fn write(&mut self, fixtures: &[Rgb]) -> Result<(), PinError> {
        self.write_grayscale(fixtures)
    }
}
