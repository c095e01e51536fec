#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::cue::{Cue, CueEnd};
use crate::effect::{CueClock, EffectStates, Scene};
use crate::random::Xorshift128;
use crate::spectrum::Spectrum;
use crate::store::ChannelStore;

/// Show renderer - runs the active cue step and the fade engine once per tick
pub struct Renderer<'a, const FIXTURES: usize> {
    // Show configuration
    cues: &'a [Cue<'a>],

    // Selection
    cue: usize,
    step: usize,

    // Internal state
    clock: CueClock,
    channels: ChannelStore<FIXTURES>,
    spectrum: Spectrum,
    states: EffectStates,
    rng: Xorshift128,
}

impl<'a, const FIXTURES: usize> Renderer<'a, FIXTURES> {
    /// Create a renderer positioned on the first cue, every fixture dark
    pub fn new(cues: &'a [Cue<'a>]) -> Self {
        Self::with_rng(cues, Xorshift128::new())
    }

    /// Create a renderer drawing random numbers from `rng`
    pub fn with_rng(cues: &'a [Cue<'a>], rng: Xorshift128) -> Self {
        Self {
            cues,
            cue: 0,
            step: 0,
            clock: CueClock::default(),
            channels: ChannelStore::new(),
            spectrum: Spectrum::default(),
            states: EffectStates::default(),
            rng,
        }
    }

    /// Process one tick
    ///
    /// Advances the cue step if the auto-advance count asks for it, runs the
    /// step's effect, then the fade engine. Returns the colors to show.
    pub fn render(&mut self) -> &[Rgb] {
        self.advance_step();

        let cues = self.cues;
        if let Some(cue) = cues.get(self.cue)
            && let Some(step) = cue.steps.get(self.step)
        {
            if let Some(palette) = step.palette {
                self.spectrum.set_palette(self.clock.ticks, palette);
            }
            let mut scene = Scene {
                channels: &mut self.channels,
                spectrum: &mut self.spectrum,
                rng: &mut self.rng,
                clock: &mut self.clock,
            };
            step.effect.step(&mut self.states, &mut scene);
        }

        self.channels.advance_fades();
        self.channels.colors()
    }

    /// Select a cue by index, starting from its first step.
    ///
    /// Returns false and keeps the current cue if there is no such cue.
    pub fn select_cue(&mut self, cue: usize) -> bool {
        if cue >= self.cues.len() {
            return false;
        }

        #[cfg(feature = "esp32-log")]
        println!("[Renderer.select_cue] cue={}", cue);

        self.cue = cue;
        self.step = 0;
        self.clock.restart();
        true
    }

    /// Jump to a step of the current cue
    pub fn select_step(&mut self, step: usize) {
        #[cfg(feature = "esp32-log")]
        println!("[Renderer.select_step] cue={} step={}", self.cue, step);

        self.step = step;
        self.clock.restart();
    }

    /// Go to the next cue, staying on the last one
    pub fn next_cue(&mut self) {
        let next = (self.cue + 1).min(self.cues.len().saturating_sub(1));
        self.select_cue(next);
    }

    /// Go back one cue, staying on the first one
    pub fn previous_cue(&mut self) {
        self.select_cue(self.cue.saturating_sub(1));
    }

    /// Force every fixture dark immediately
    pub fn blackout(&mut self) {
        self.channels.blackout();
    }

    pub fn cue(&self) -> usize {
        self.cue
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn clock(&self) -> &CueClock {
        &self.clock
    }

    pub fn channels(&self) -> &ChannelStore<FIXTURES> {
        &self.channels
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn states(&self) -> &EffectStates {
        &self.states
    }

    /// Move to the next step when the auto-advance count hits a threshold
    fn advance_step(&mut self) {
        let cues = self.cues;
        let Some(cue) = cues.get(self.cue) else {
            return;
        };
        if !cue.advances_at(self.clock.auto_advance) {
            return;
        }

        let next = self.step + 1;
        if next < cue.steps.len() {
            self.step = next;
            self.clock.ticks = 0;
        } else {
            match cue.on_end {
                CueEnd::Hold => {}
                CueEnd::Restart => {
                    self.step = 0;
                    self.clock.restart();
                }
                CueEnd::Jump { step, auto_advance } => {
                    self.step = step;
                    self.clock.ticks = 0;
                    self.clock.auto_advance = auto_advance;
                }
            }
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[Renderer.advance_step] cue={} step={} auto_advance={}",
            self.cue, self.step, self.clock.auto_advance
        );
    }
}
