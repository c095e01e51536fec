//! Runner: one lit fixture moves along the row
//!
//! Every `period` ticks the next fixture is lit with the foreground. Fixtures
//! that have finished fading fall back to the background. At the end of the
//! row the runner wraps or, with `bounce`, turns round.

use super::{Direction, Effect, Scene};

/// Runner effect parameters
///
/// `wait` holds the runner at the end of the row until the last fixture has
/// faded back to the background. With `fade_out == 0` settled fixtures snap
/// back immediately, except the one just lit; combined with `wait` this cuts
/// hard and looks odd, but is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Runner {
    pub period: u8,
    pub direction: Direction,
    pub fade_in: u8,
    pub fade_out: u8,
    pub wait: bool,
    pub bounce: bool,
}

/// Runner position, kept across restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunnerState {
    /// Fixtures lit in the current pass; `FIXTURES` means the pass is over
    position: usize,
    reversed: Direction,
}

impl RunnerState {
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl Runner {
    /// Index of the fixture lit `position - 1` steps into a pass
    const fn lit_fixture<const FIXTURES: usize>(
        heading: Direction,
        position: usize,
    ) -> Option<usize> {
        if position == 0 || position > FIXTURES {
            return None;
        }
        Some(match heading {
            Direction::Forward => position - 1,
            Direction::Backward => FIXTURES - position,
        })
    }

    /// Wrap at the end of a pass, or hold there while waiting
    fn wrap<const FIXTURES: usize>(&self, state: &mut RunnerState, scene: &Scene<'_, FIXTURES>) {
        if !self.wait {
            state.position = 0;
            if self.bounce {
                state.reversed = state.reversed.reversed();
                state.position = 1;
            }
            return;
        }

        let background = scene.background();
        let heading = self.direction.then(state.reversed);
        let last = match heading {
            Direction::Forward => FIXTURES.checked_sub(1),
            Direction::Backward => Some(0),
        };
        let released = last
            .and_then(|fixture| scene.channels.current(fixture))
            .is_none_or(|color| color == background);

        if released {
            state.position = 0;
            if self.bounce {
                state.reversed = state.reversed.reversed();
            }
        }
    }
}

impl Effect for Runner {
    type State = RunnerState;

    fn step<const FIXTURES: usize>(&self, state: &mut RunnerState, scene: &mut Scene<'_, FIXTURES>) {
        if FIXTURES == 0 {
            scene.end_tick(self.fade_out);
            return;
        }
        let ticks = scene.ticks();

        if ticks == 0 {
            state.reversed = Direction::Forward;
            scene.darken_all(self.fade_in);
        }

        let on_beat = ticks.checked_rem(u16::from(self.period)).is_none_or(|rem| rem == 0);
        if on_beat {
            if state.position == FIXTURES {
                self.wrap(state, scene);
                if state.position != FIXTURES && scene.spectrum.style().is_by_cycle() {
                    scene.advance_spectrum();
                }
            }

            if state.position != FIXTURES {
                let heading = self.direction.then(state.reversed);
                let fixture = match heading {
                    Direction::Forward => state.position,
                    Direction::Backward => FIXTURES - state.position - 1,
                };
                scene.light(fixture, self.fade_in);

                if scene.spectrum.style().is_by_time() {
                    scene.advance_spectrum();
                }
                state.position += 1;
            }
        }

        let heading = self.direction.then(state.reversed);
        let lit = Self::lit_fixture::<FIXTURES>(heading, state.position);
        for fixture in 0..FIXTURES {
            if !scene.is_settled(fixture) {
                continue;
            }
            if self.fade_out != 0 || lit != Some(fixture) {
                scene.darken(fixture, self.fade_out);
            }
        }

        scene.end_tick(self.fade_out);
    }
}
