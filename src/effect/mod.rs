//! Effect system with compile-time known effect variants
//!
//! Every effect is a parameter struct implementing [`Effect`]. Its private
//! counters live in a separate state value that persists across ticks, so
//! selecting another effect never resets it. [`EffectStates`] owns one state
//! per stateful effect and [`EffectSlot`] tags which effect is active.

mod binary_counter;
mod counting;
mod fades;
mod pattern;
mod raindrop;
mod runner;
mod solid;

pub use binary_counter::{BinaryCounter, BinaryCounterState};
pub use counting::{Counting, CountingState, StartState};
pub use fades::PeriodicFade;
pub use pattern::{PatternInvert, PatternInvertState, PatternShift, PatternShiftState, rotate_mask};
pub use raindrop::{MAX_DROPS, Raindrop, RaindropState};
pub use runner::{Runner, RunnerState};
pub use solid::{AllOff, AllOn, Blackout};

use crate::color::Rgb;
use crate::random::Xorshift128;
use crate::spectrum::Spectrum;
use crate::store::ChannelStore;

/// Direction an effect moves across the fixtures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// From the first fixture to the last
    #[default]
    Forward,
    /// From the last fixture to the first
    Backward,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Combine with another direction, like multiplying signs
    #[must_use]
    pub const fn then(self, other: Self) -> Self {
        match other {
            Self::Forward => self,
            Self::Backward => self.reversed(),
        }
    }
}

/// Counters shared by the effect that is running and the cue sequencer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueClock {
    /// Ticks since the effect (re)started. Tick 0 runs setup.
    pub ticks: u16,
    /// Counts effect ticks; the cue sequencer advances steps on it
    pub auto_advance: u32,
    /// Fade-out rate of the last effect that ran, used by [`Blackout`]
    pub off_rate: u8,
}

impl CueClock {
    /// Restart the effect and the auto-advance count
    pub fn restart(&mut self) {
        self.ticks = 0;
        self.auto_advance = 0;
    }
}

/// Everything an effect step reads and writes
pub struct Scene<'a, const FIXTURES: usize> {
    pub channels: &'a mut ChannelStore<FIXTURES>,
    pub spectrum: &'a mut Spectrum,
    pub rng: &'a mut Xorshift128,
    pub clock: &'a mut CueClock,
}

impl<const FIXTURES: usize> Scene<'_, FIXTURES> {
    pub fn ticks(&self) -> u16 {
        self.clock.ticks
    }

    pub fn background(&self) -> Rgb {
        self.spectrum.background()
    }

    pub fn foreground(&self) -> Rgb {
        self.spectrum.foreground()
    }

    /// Fade one fixture to the foreground
    pub fn light(&mut self, fixture: usize, rate: u8) {
        let color = self.foreground();
        self.channels.set_target(fixture, color, rate);
    }

    /// Fade one fixture to the background
    pub fn darken(&mut self, fixture: usize, rate: u8) {
        let color = self.background();
        self.channels.set_target(fixture, color, rate);
    }

    pub fn light_all(&mut self, rate: u8) {
        let color = self.foreground();
        self.channels.fill_target(color, rate);
    }

    pub fn darken_all(&mut self, rate: u8) {
        let color = self.background();
        self.channels.fill_target(color, rate);
    }

    pub fn is_settled(&self, fixture: usize) -> bool {
        self.channels.is_settled(fixture)
    }

    pub fn all_settled(&self) -> bool {
        (0..FIXTURES).all(|fixture| self.channels.is_settled(fixture))
    }

    pub fn advance_spectrum(&mut self) {
        self.spectrum.advance(self.rng);
    }

    /// Light fixtures whose bit is set in `mask`, darken the others
    pub fn show_mask(&mut self, mask: u16, fade_in: u8, fade_out: u8) {
        for fixture in 0..FIXTURES {
            if mask_bit(mask, fixture) {
                self.light(fixture, fade_in);
            } else {
                self.darken(fixture, fade_out);
            }
        }
    }

    /// Bookkeeping at the end of a tick that counts towards `ticks`
    pub(crate) fn end_tick(&mut self, fade_out: u8) {
        self.clock.ticks = self.clock.ticks.wrapping_add(1);
        self.end_untimed_tick(fade_out);
    }

    /// Bookkeeping at the end of a tick that leaves `ticks` alone
    pub(crate) fn end_untimed_tick(&mut self, fade_out: u8) {
        self.clock.auto_advance = self.clock.auto_advance.wrapping_add(1);
        self.clock.off_rate = fade_out;
    }
}

/// Whether bit `fixture` of `mask` is set; fixtures past bit 15 read as off
pub(crate) const fn mask_bit(mask: u16, fixture: usize) -> bool {
    fixture < u16::BITS as usize && mask & (1 << fixture) != 0
}

/// Mask with the low `fixtures` bits set
pub(crate) const fn fixture_mask(fixtures: usize) -> u16 {
    if fixtures >= u16::BITS as usize {
        u16::MAX
    } else {
        (1 << fixtures) - 1
    }
}

pub trait Effect {
    /// Private counters persisting across ticks
    type State: Default;

    /// Run one control-loop tick
    fn step<const FIXTURES: usize>(&self, state: &mut Self::State, scene: &mut Scene<'_, FIXTURES>);
}

/// Effect slot - the active effect and its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSlot {
    /// Every fixture to the foreground
    AllOn(AllOn),
    /// Every fixture to the background
    AllOff(AllOff),
    /// Every fixture dark, at the last fade-out rate
    Blackout(Blackout),
    /// All fixtures fade to the foreground and back
    PeriodicFade(PeriodicFade),
    /// A single lit fixture running along the row
    Runner(Runner),
    /// Fixtures switch state one after another
    Counting(Counting),
    /// Random fixtures light up and fade away
    Raindrop(Raindrop),
    /// A bit pattern and its complement alternate
    PatternInvert(PatternInvert),
    /// A bit pattern rotates along the row
    PatternShift(PatternShift),
    /// The fixtures count in binary
    BinaryCounter(BinaryCounter),
}

/// One persistent state per stateful effect
#[derive(Debug, Clone, Default)]
pub struct EffectStates {
    pub runner: RunnerState,
    pub counting: CountingState,
    pub raindrop: RaindropState,
    pub pattern_invert: PatternInvertState,
    pub pattern_shift: PatternShiftState,
    pub binary_counter: BinaryCounterState,
}

impl EffectSlot {
    /// Run one tick of the active effect against its own state
    pub fn step<const FIXTURES: usize>(
        &self,
        states: &mut EffectStates,
        scene: &mut Scene<'_, FIXTURES>,
    ) {
        match self {
            Self::AllOn(effect) => effect.step(&mut (), scene),
            Self::AllOff(effect) => effect.step(&mut (), scene),
            Self::Blackout(effect) => effect.step(&mut (), scene),
            Self::PeriodicFade(effect) => effect.step(&mut (), scene),
            Self::Runner(effect) => effect.step(&mut states.runner, scene),
            Self::Counting(effect) => effect.step(&mut states.counting, scene),
            Self::Raindrop(effect) => effect.step(&mut states.raindrop, scene),
            Self::PatternInvert(effect) => effect.step(&mut states.pattern_invert, scene),
            Self::PatternShift(effect) => effect.step(&mut states.pattern_shift, scene),
            Self::BinaryCounter(effect) => effect.step(&mut states.binary_counter, scene),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::AllOn(_) => "all_on",
            Self::AllOff(_) => "all_off",
            Self::Blackout(_) => "blackout",
            Self::PeriodicFade(_) => "periodic_fade",
            Self::Runner(_) => "runner",
            Self::Counting(_) => "counting",
            Self::Raindrop(_) => "raindrop",
            Self::PatternInvert(_) => "pattern_invert",
            Self::PatternShift(_) => "pattern_shift",
            Self::BinaryCounter(_) => "binary_counter",
        }
    }
}
