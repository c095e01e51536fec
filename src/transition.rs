//! Fade engine
//!
//! Runs once per control-loop tick, whatever effect is active. Every channel
//! moves towards its pending value by at most the fixture's rate.

use crate::color::{Rgb, components, from_components};
use crate::store::ChannelStore;

/// Move `current` towards `target` by at most `rate`.
///
/// A rate of 0 jumps straight to the target.
#[inline]
pub const fn approach(current: u8, target: u8, rate: u8) -> u8 {
    if rate == 0 {
        return target;
    }
    if current < target {
        let next = current.saturating_add(rate);
        if next > target { target } else { next }
    } else if current > target {
        let next = current.saturating_sub(rate);
        if next < target { target } else { next }
    } else {
        current
    }
}

/// Move every component of `current` towards `target`
pub fn approach_rgb(current: Rgb, target: Rgb, rate: u8) -> Rgb {
    let mut next = components(current);
    for (value, target) in next.iter_mut().zip(components(target)) {
        *value = approach(*value, target, rate);
    }
    from_components(next)
}

impl<const FIXTURES: usize> ChannelStore<FIXTURES> {
    /// Advance every fixture one fade step
    pub fn advance_fades(&mut self) {
        for (current, pending, rate) in self.fixtures_mut() {
            *current = approach_rgb(*current, *pending, rate);
        }
    }

    /// Whether any fixture is still fading
    pub fn is_transitioning(&self) -> bool {
        (0..FIXTURES).any(|fixture| !self.is_settled(fixture))
    }
}
