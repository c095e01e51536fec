//! Counting: fixtures switch state one by one, like a countdown
//!
//! The sweep visits one step per fixture plus one trailing step on the
//! sentinel index `FIXTURES`, which addresses no fixture but still takes
//! its `min_period`.

use super::{Direction, Effect, Scene};

/// How the row looks when a sweep starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartState {
    /// All fixtures lit; the sweep darkens them
    Lit,
    /// All fixtures dark; the sweep lights them
    #[default]
    Dark,
    /// Fixtures are left as they are; the sweep lights them
    Keep,
}

/// Counting effect parameters
///
/// With `wait` the next fixture only switches once the previous one has
/// finished fading. `looped` repeats the sweep; on each repeat
/// `reverse_on_loop` flips the direction and `swap_on_loop` swaps the start
/// state, which together give a ping-pong countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counting {
    pub min_period: u8,
    pub direction: Direction,
    pub fade_in: u8,
    pub fade_out: u8,
    pub start: StartState,
    pub wait: bool,
    pub looped: bool,
    pub reverse_on_loop: bool,
    pub swap_on_loop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountingState {
    position: usize,
    reversed: Direction,
    fade_in: u8,
    mode: StartState,
}

impl CountingState {
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl Counting {
    fn fill<const FIXTURES: usize>(mode: StartState, fade_in: u8, scene: &mut Scene<'_, FIXTURES>) {
        match mode {
            StartState::Lit => scene.light_all(fade_in),
            StartState::Dark => scene.darken_all(fade_in),
            StartState::Keep => {}
        }
    }

    /// Whether the sweep may switch the fixture at the current position
    fn ready<const FIXTURES: usize>(&self, state: &CountingState, scene: &Scene<'_, FIXTURES>) -> bool {
        if state.position == 0 {
            return scene.all_settled();
        }
        if !self.wait {
            return true;
        }
        if scene.ticks() == 0 {
            return false;
        }
        let previous = match self.direction.then(state.reversed) {
            Direction::Forward => state.position - 1,
            Direction::Backward => FIXTURES + 1 - state.position,
        };
        scene.is_settled(previous)
    }

    fn sweep<const FIXTURES: usize>(&self, state: &mut CountingState, scene: &mut Scene<'_, FIXTURES>) {
        if scene.ticks() >= u16::from(self.min_period) && self.ready(state, scene) {
            let fixture = match self.direction.then(state.reversed) {
                Direction::Forward => state.position,
                Direction::Backward => FIXTURES - state.position,
            };
            if state.mode == StartState::Lit {
                scene.darken(fixture, self.fade_out);
            } else {
                scene.light(fixture, state.fade_in);
            }

            scene.clock.ticks = 0;
            state.position += 1;
            if scene.spectrum.style().is_by_time() {
                scene.advance_spectrum();
            }
        }
        scene.end_tick(self.fade_out);
    }

    fn restart_sweep<const FIXTURES: usize>(
        &self,
        state: &mut CountingState,
        scene: &mut Scene<'_, FIXTURES>,
    ) {
        let by_cycle = scene.spectrum.style().is_by_cycle();
        if by_cycle && !self.swap_on_loop {
            scene.advance_spectrum();
        }

        if self.reverse_on_loop {
            state.reversed = state.reversed.reversed();
        }

        if self.swap_on_loop {
            if state.mode == StartState::Dark {
                state.mode = StartState::Lit;
            } else {
                state.mode = StartState::Dark;
                if by_cycle {
                    scene.advance_spectrum();
                }
            }
        } else {
            Self::fill(state.mode, state.fade_in, scene);
        }

        state.position = 0;
        scene.end_untimed_tick(self.fade_out);
    }
}

impl Effect for Counting {
    type State = CountingState;

    fn step<const FIXTURES: usize>(&self, state: &mut CountingState, scene: &mut Scene<'_, FIXTURES>) {
        if scene.ticks() == 0 {
            state.reversed = Direction::Forward;
            state.position = 0;
            state.fade_in = self.fade_in;
            state.mode = self.start;
            Self::fill(state.mode, state.fade_in, scene);
        }

        if state.position <= FIXTURES {
            self.sweep(state, scene);
        } else if self.looped {
            self.restart_sweep(state, scene);
        } else {
            scene.end_untimed_tick(self.fade_out);
        }
    }
}
