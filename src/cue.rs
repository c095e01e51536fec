//! Show cues
//!
//! A cue is a list of steps, each an effect with an optional palette. Steps
//! advance automatically when the auto-advance count, which every effect
//! tick bumps, reaches one of the cue's thresholds.

use crate::effect::EffectSlot;
use crate::spectrum::Palette;

/// One step of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Palette applied when the step starts; `None` keeps the current one
    pub palette: Option<Palette>,
    pub effect: EffectSlot,
}

impl Step {
    pub const fn new(palette: Palette, effect: EffectSlot) -> Self {
        Self {
            palette: Some(palette),
            effect,
        }
    }

    /// Step that keeps whatever palette is active
    pub const fn effect(effect: EffectSlot) -> Self {
        Self {
            palette: None,
            effect,
        }
    }
}

/// What happens when a cue advances past its last step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CueEnd {
    /// Stay on the last step
    #[default]
    Hold,
    /// Start over from the first step with the count cleared
    Restart,
    /// Continue at `step` with the auto-advance count set to `auto_advance`
    Jump { step: usize, auto_advance: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue<'a> {
    pub steps: &'a [Step],
    /// Auto-advance counts at which the next step starts
    pub advance_at: &'a [u32],
    pub on_end: CueEnd,
}

impl<'a> Cue<'a> {
    /// Cue that only leaves its steps when selected away
    pub const fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            advance_at: &[],
            on_end: CueEnd::Hold,
        }
    }

    /// Cue with a single step
    pub const fn single(step: &'a Step) -> Self {
        Self::new(core::slice::from_ref(step))
    }

    #[must_use]
    pub const fn advancing(mut self, advance_at: &'a [u32], on_end: CueEnd) -> Self {
        self.advance_at = advance_at;
        self.on_end = on_end;
        self
    }

    /// Whether the step should advance at this auto-advance count
    pub fn advances_at(&self, auto_advance: u32) -> bool {
        self.advance_at.contains(&auto_advance)
    }
}
