use super::{Effect, Scene, fixture_mask};

/// The row counts up in binary every period, then back down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinaryCounter {
    pub period: u8,
    pub fade_in: u8,
    pub fade_out: u8,
}

/// Counter value, kept across restarts; only the direction resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinaryCounterState {
    value: u16,
    counting_down: bool,
}

impl BinaryCounterState {
    pub const fn value(&self) -> u16 {
        self.value
    }
}

impl Effect for BinaryCounter {
    type State = BinaryCounterState;

    fn step<const FIXTURES: usize>(
        &self,
        state: &mut BinaryCounterState,
        scene: &mut Scene<'_, FIXTURES>,
    ) {
        if scene.ticks() == 0 {
            scene.darken_all(self.fade_in);
            state.counting_down = false;
        }

        if scene.ticks() >= u16::from(self.period) {
            scene.show_mask(state.value, self.fade_in, self.fade_out);
            scene.clock.ticks = 0;

            state.value = if state.counting_down {
                state.value.wrapping_sub(1)
            } else {
                state.value.wrapping_add(1)
            };
            if state.value >= fixture_mask(FIXTURES) || state.value == 0 {
                state.counting_down = !state.counting_down;
            }
        }

        scene.end_tick(self.fade_out);
    }
}
