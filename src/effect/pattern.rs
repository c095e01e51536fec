//! Bit-pattern effects
//!
//! Bit `n` of the mask stands for fixture `n`: set bits show the foreground,
//! clear bits the background. The mask is shown every `period` ticks and
//! then changed; the spectrum advances on every tick.

use super::{Direction, Effect, Scene, fixture_mask, mask_bit};

/// Pattern and its complement alternate every period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternInvert {
    pub pattern: u16,
    pub period: u8,
    pub fade_in: u8,
    pub fade_out: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternInvertState {
    mask: u16,
}

impl PatternInvertState {
    /// Mask shown at the next period
    pub const fn mask(&self) -> u16 {
        self.mask
    }
}

impl Effect for PatternInvert {
    type State = PatternInvertState;

    fn step<const FIXTURES: usize>(
        &self,
        state: &mut PatternInvertState,
        scene: &mut Scene<'_, FIXTURES>,
    ) {
        if scene.ticks() == 0 {
            scene.darken_all(self.fade_in);
            state.mask = self.pattern;
        }

        if scene.ticks() >= u16::from(self.period) {
            scene.show_mask(state.mask, self.fade_in, self.fade_out);
            scene.clock.ticks = 0;
            state.mask = !state.mask;
        }

        scene.end_tick(self.fade_out);
        scene.advance_spectrum();
    }
}

/// Pattern rotates one fixture per period, optionally bouncing off the ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternShift {
    pub pattern: u16,
    pub period: u8,
    pub fade_in: u8,
    pub fade_out: u8,
    pub direction: Direction,
    /// Turn round when a set bit reaches the leading end
    pub bounce: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternShiftState {
    mask: u16,
    direction: Direction,
}

impl PatternShiftState {
    /// Mask shown at the next period
    pub const fn mask(&self) -> u16 {
        self.mask
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Rotate the low `fixtures` bits of `mask` by one position.
///
/// Forward moves bit `n` to `n + 1` and the top bit round to bit 0. The
/// window is at most 16 bits wide; fixtures past bit 15 stay dark.
pub const fn rotate_mask(mask: u16, fixtures: usize, direction: Direction) -> u16 {
    let width = if fixtures > u16::BITS as usize {
        u16::BITS as usize
    } else {
        fixtures
    };
    if width == 0 {
        return 0;
    }
    let window = fixture_mask(width);
    let mask = mask & window;
    let top = width - 1;
    match direction {
        Direction::Forward => {
            let carry = (mask >> top) & 1;
            ((mask << 1) | carry) & window
        }
        Direction::Backward => {
            let carry = mask & 1;
            (mask >> 1) | (carry << top)
        }
    }
}

impl Effect for PatternShift {
    type State = PatternShiftState;

    fn step<const FIXTURES: usize>(
        &self,
        state: &mut PatternShiftState,
        scene: &mut Scene<'_, FIXTURES>,
    ) {
        if scene.ticks() == 0 {
            scene.darken_all(self.fade_in);
            state.mask = self.pattern & fixture_mask(FIXTURES);
            state.direction = self.direction;
        }

        if scene.ticks() >= u16::from(self.period) {
            scene.show_mask(state.mask, self.fade_in, self.fade_out);
            scene.clock.ticks = 0;

            if self.bounce {
                let leading = match state.direction {
                    Direction::Forward => FIXTURES.min(u16::BITS as usize).saturating_sub(1),
                    Direction::Backward => 0,
                };
                if mask_bit(state.mask, leading) {
                    state.direction = state.direction.reversed();
                }
            }
            state.mask = rotate_mask(state.mask, FIXTURES, state.direction);
        }

        scene.end_tick(self.fade_out);
        scene.advance_spectrum();
    }
}
