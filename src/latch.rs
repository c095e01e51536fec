//! Cycle-boundary latching
//!
//! The control loop shifts a frame and publishes it on a [`LatchFlag`]. The
//! cycle timer fires once per grayscale cycle (4096 GSCLK periods) and runs
//! [`CycleHandler::on_cycle_boundary`], which latches the frame only while
//! outputs are blanked and the grayscale clock is held. At most one frame is
//! ever pending; publishing again before the boundary replaces it.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::Duration;
use embedded_hal::digital::OutputPin;

use crate::protocol::{ClockGate, PinError, SignalPin};

/// Set when a shifted frame waits for the next cycle boundary
pub struct LatchFlag {
    pending: Mutex<Cell<bool>>,
}

impl LatchFlag {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
        }
    }

    /// Mark the shifted frame as ready to latch
    pub fn publish(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(true));
    }

    /// Clear the flag, returning whether a frame was pending
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).replace(false))
    }

    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }
}

impl Default for LatchFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt half of the driver: owns XLAT, BLANK and the grayscale clock gate
pub struct CycleHandler<'a, XLAT, BLANK, GS> {
    latch: SignalPin<XLAT>,
    blank: SignalPin<BLANK>,
    gate: GS,
    flag: &'a LatchFlag,
}

impl<'a, XLAT, BLANK, GS> CycleHandler<'a, XLAT, BLANK, GS>
where
    XLAT: OutputPin,
    BLANK: OutputPin,
    GS: ClockGate,
{
    pub(crate) const fn new(
        latch: SignalPin<XLAT>,
        blank: SignalPin<BLANK>,
        gate: GS,
        flag: &'a LatchFlag,
    ) -> Self {
        Self {
            latch,
            blank,
            gate,
            flag,
        }
    }

    /// Start the first grayscale cycle, latching whatever was shifted so far
    pub fn start(&mut self) -> Result<bool, PinError> {
        self.gate.enable()?;
        self.on_cycle_boundary()
    }

    /// End the current grayscale cycle and begin the next one.
    ///
    /// Call from the cycle timer interrupt. Returns whether a frame was
    /// latched.
    pub fn on_cycle_boundary(&mut self) -> Result<bool, PinError> {
        self.blank.set_high()?;
        self.gate.disable()?;

        let latched = self.flag.take();
        if latched {
            self.latch.pulse()?;
        }

        self.gate.enable()?;
        self.blank.set_low()?;
        Ok(latched)
    }

    pub fn flag(&self) -> &'a LatchFlag {
        self.flag
    }
}

/// Timer settings for the grayscale clock and the cycle interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTiming {
    /// System clocks per GSCLK period
    pub gsclk_period: u32,
    /// Grayscale cycles per BLANK period; higher dims every output
    pub brightness_divider: u32,
}

/// GSCLK periods in one grayscale cycle
pub const GRAYSCALE_STEPS: u32 = 4096;

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            gsclk_period: 1,
            brightness_divider: 1,
        }
    }
}

impl CycleTiming {
    fn system_clocks(&self) -> u64 {
        u64::from(GRAYSCALE_STEPS)
            .saturating_mul(u64::from(self.gsclk_period.max(1)))
            .saturating_mul(u64::from(self.brightness_divider.max(1)))
    }

    /// Compare value for the cycle timer, counting from 0
    pub fn timer_compare(&self) -> u32 {
        u32::try_from(self.system_clocks() - 1).unwrap_or(u32::MAX)
    }

    /// Cycle interrupts per second at `system_hz`
    pub fn cycle_hz(&self, system_hz: u32) -> u32 {
        u32::try_from(u64::from(system_hz) / self.system_clocks()).unwrap_or(u32::MAX)
    }

    /// Time between cycle interrupts at `system_hz`
    pub fn cycle_period(&self, system_hz: u32) -> Duration {
        let micros = self.system_clocks().saturating_mul(1_000_000) / u64::from(system_hz.max(1));
        Duration::from_micros(micros)
    }
}
