use super::{Effect, Scene};

/// All fixtures fade up to the foreground, hold, and fade back to the
/// background. A full cycle is `2 * period` ticks; the spectrum advances as
/// the fixtures turn back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodicFade {
    pub period: u8,
    pub fade_in: u8,
    pub fade_out: u8,
}

impl Effect for PeriodicFade {
    type State = ();

    fn step<const FIXTURES: usize>(&self, _state: &mut (), scene: &mut Scene<'_, FIXTURES>) {
        let ticks = scene.ticks();
        let period = u16::from(self.period);

        if ticks == 0 {
            scene.darken_all(self.fade_in);
        }

        if ticks == 1 {
            scene.light_all(self.fade_in);
        } else if ticks == period {
            scene.darken_all(self.fade_out);
            scene.advance_spectrum();
        }

        if ticks >= 2 * period {
            scene.clock.ticks = 0;
        }
        scene.end_tick(self.fade_out);
    }
}
