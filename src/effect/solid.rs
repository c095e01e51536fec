//! Whole-row fills with no animation of their own
//!
//! These never touch `ticks`, so a palette given alongside them is applied
//! on every tick.

use super::{Effect, Scene};
use crate::color::BLACK;

/// Every fixture fades to the current foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllOn {
    pub fade_in: u8,
    /// Remembered for a following [`Blackout`]
    pub fade_out: u8,
}

impl Effect for AllOn {
    type State = ();

    fn step<const FIXTURES: usize>(&self, _state: &mut (), scene: &mut Scene<'_, FIXTURES>) {
        scene.light_all(self.fade_in);
        scene.end_untimed_tick(self.fade_out);
    }
}

/// Every fixture fades to the background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllOff {
    pub fade_out: u8,
}

impl Effect for AllOff {
    type State = ();

    fn step<const FIXTURES: usize>(&self, _state: &mut (), scene: &mut Scene<'_, FIXTURES>) {
        scene.darken_all(self.fade_out);
        scene.end_untimed_tick(self.fade_out);
    }
}

/// Every fixture fades to black at the fade-out rate of the effect that ran
/// before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blackout;

impl Effect for Blackout {
    type State = ();

    fn step<const FIXTURES: usize>(&self, _state: &mut (), scene: &mut Scene<'_, FIXTURES>) {
        let rate = scene.clock.off_rate;
        scene.channels.fill_target(BLACK, rate);
        scene.end_untimed_tick(rate);
    }
}
