//! Raindrop: random fixtures light up and fade away

use heapless::Vec;

use super::{Effect, Scene};

/// Most fixtures a raindrop set can hold
pub const MAX_DROPS: usize = 16;

/// Raindrop effect parameters
///
/// `number_on` fixtures are drawn at random (repeats allowed) and lit. Once
/// the last drawn one has finished fading in, the whole set fades out and a
/// new set is drawn straight away, or with `wait`, only after every drop has
/// gone back to the background. At most [`MAX_DROPS`] fixtures are drawn,
/// whatever `number_on` asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Raindrop {
    pub min_period: u8,
    pub number_on: u8,
    pub fade_in: u8,
    pub fade_out: u8,
    pub wait: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RaindropState {
    drops: Vec<usize, MAX_DROPS>,
    /// The set has faded out and waits for every drop to settle
    draining: bool,
}

impl RaindropState {
    /// Fixtures in the current set, in draw order
    pub fn drops(&self) -> &[usize] {
        &self.drops
    }
}

impl Raindrop {
    fn draw<const FIXTURES: usize>(&self, state: &mut RaindropState, scene: &mut Scene<'_, FIXTURES>) {
        state.drops.clear();
        let bound = u16::try_from(FIXTURES).unwrap_or(u16::MAX);
        for _ in 0..usize::from(self.number_on).min(MAX_DROPS) {
            let fixture = usize::from(scene.rng.below(bound));
            if state.drops.push(fixture).is_err() {
                break;
            }
            scene.light(fixture, self.fade_in);
        }
    }

    fn release<const FIXTURES: usize>(&self, state: &RaindropState, scene: &mut Scene<'_, FIXTURES>) {
        for &fixture in &state.drops {
            scene.darken(fixture, self.fade_out);
        }
    }
}

impl Effect for Raindrop {
    type State = RaindropState;

    fn step<const FIXTURES: usize>(&self, state: &mut RaindropState, scene: &mut Scene<'_, FIXTURES>) {
        if scene.ticks() == 0 {
            scene.darken_all(self.fade_in);
            state.draining = false;
            self.draw(state, scene);
        }

        if scene.ticks() >= u16::from(self.min_period) {
            let tracked = state.drops.last().copied();
            if tracked.is_none_or(|fixture| scene.is_settled(fixture)) {
                let idle = state.drops.iter().all(|&fixture| scene.is_settled(fixture));
                self.release(state, scene);

                if !self.wait || (state.draining && idle) {
                    self.draw(state, scene);
                    scene.advance_spectrum();
                    scene.clock.ticks = 0;
                    state.draining = false;
                } else {
                    state.draining = true;
                }
            }
        }

        scene.end_tick(self.fade_out);
    }
}
