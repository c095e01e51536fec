//! Per-fixture channel values
//!
//! Holds what every fixture currently shows, what it is fading towards and how
//! fast. Effects only write pending targets and rates; the fade engine in
//! [`crate::transition`] moves current values.

use crate::color::{BLACK, Rgb};

/// Current and pending color of every fixture, plus per-fixture fade rate
#[derive(Debug, Clone)]
pub struct ChannelStore<const FIXTURES: usize> {
    current: [Rgb; FIXTURES],
    pending: [Rgb; FIXTURES],
    rates: [u8; FIXTURES],
}

impl<const FIXTURES: usize> Default for ChannelStore<FIXTURES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const FIXTURES: usize> ChannelStore<FIXTURES> {
    /// Create a store with every fixture dark and settled
    pub const fn new() -> Self {
        Self {
            current: [BLACK; FIXTURES],
            pending: [BLACK; FIXTURES],
            rates: [0; FIXTURES],
        }
    }

    /// Number of fixtures
    pub const fn len(&self) -> usize {
        FIXTURES
    }

    pub const fn is_empty(&self) -> bool {
        FIXTURES == 0
    }

    /// Set the color a fixture fades towards and the rate it fades at.
    ///
    /// A rate of 0 snaps on the next fade step. Writes to fixtures past the
    /// end are ignored.
    pub fn set_target(&mut self, fixture: usize, color: Rgb, rate: u8) {
        if let (Some(pending), Some(fade)) =
            (self.pending.get_mut(fixture), self.rates.get_mut(fixture))
        {
            *pending = color;
            *fade = rate;
        }
    }

    /// Set the same target and rate on every fixture
    pub fn fill_target(&mut self, color: Rgb, rate: u8) {
        self.pending.fill(color);
        self.rates.fill(rate);
    }

    /// Color a fixture currently shows
    pub fn current(&self, fixture: usize) -> Option<Rgb> {
        self.current.get(fixture).copied()
    }

    /// Color a fixture is fading towards
    pub fn pending(&self, fixture: usize) -> Option<Rgb> {
        self.pending.get(fixture).copied()
    }

    /// Fade rate of a fixture
    pub fn rate(&self, fixture: usize) -> Option<u8> {
        self.rates.get(fixture).copied()
    }

    /// Whether a fixture has reached its target.
    ///
    /// Fixtures past the end count as settled.
    pub fn is_settled(&self, fixture: usize) -> bool {
        match (self.current.get(fixture), self.pending.get(fixture)) {
            (Some(current), Some(pending)) => current == pending,
            _ => true,
        }
    }

    /// Current colors of all fixtures, in fixture order
    pub const fn colors(&self) -> &[Rgb; FIXTURES] {
        &self.current
    }

    /// Force every fixture dark immediately, current and pending alike
    pub fn blackout(&mut self) {
        self.current.fill(BLACK);
        self.pending.fill(BLACK);
    }

    pub(crate) fn fixtures_mut(
        &mut self,
    ) -> impl Iterator<Item = (&mut Rgb, &Rgb, u8)> + '_ {
        self.current
            .iter_mut()
            .zip(self.pending.iter())
            .zip(self.rates.iter().copied())
            .map(|((current, pending), rate)| (current, pending, rate))
    }
}
