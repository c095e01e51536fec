//! Color spectrum shared by all effects
//!
//! Effects paint with two colors: the background, which is what fixtures fall
//! back to ("off" for an effect), and the current foreground, which moves
//! between two endpoint colors according to a [`SpectrumStyle`].
//!
//! Whether a style changes "by time" or "by cycle" is decided by the effect
//! calling [`Spectrum::advance`]; the spectrum itself only knows random versus
//! smooth.

use crate::color::{BLACK, Rgb, components, from_components};
use crate::random::Xorshift128;

/// How the current foreground moves between the two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SpectrumStyle {
    /// Foreground stays on the first endpoint
    #[default]
    Static = 0,
    /// Random shade, changed on every effect step
    RandomByTime = 1,
    /// Random shade, changed once per effect cycle
    RandomByCycle = 2,
    /// Walk back and forth, one increment per effect step
    SmoothByTime = 3,
    /// Walk back and forth, one increment per effect cycle
    SmoothByCycle = 4,
}

impl SpectrumStyle {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Static,
            1 => Self::RandomByTime,
            2 => Self::RandomByCycle,
            3 => Self::SmoothByTime,
            4 => Self::SmoothByCycle,
            _ => return None,
        })
    }

    /// Changes on every effect step
    pub const fn is_by_time(self) -> bool {
        matches!(self, Self::RandomByTime | Self::SmoothByTime)
    }

    /// Changes once per effect cycle
    pub const fn is_by_cycle(self) -> bool {
        matches!(self, Self::RandomByCycle | Self::SmoothByCycle)
    }
}

/// Palette applied when an effect starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub first: Rgb,
    pub second: Rgb,
    pub style: SpectrumStyle,
    /// Number of shades between `first` and `second`
    pub steps: u8,
}

impl Palette {
    /// Single foreground color that never changes
    pub const fn solid(background: Rgb, foreground: Rgb) -> Self {
        Self {
            background,
            first: foreground,
            second: foreground,
            style: SpectrumStyle::Static,
            steps: 1,
        }
    }

    pub const fn new(
        background: Rgb,
        first: Rgb,
        second: Rgb,
        style: SpectrumStyle,
        steps: u8,
    ) -> Self {
        Self {
            background,
            first,
            second,
            style,
            steps,
        }
    }
}

/// Which endpoint a smooth walk is heading to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Second,
    First,
}

/// Background plus a moving foreground color
#[derive(Debug, Clone)]
pub struct Spectrum {
    palette: Palette,
    foreground: Rgb,
    increments: [u8; 3],
    heading: Heading,
}

impl Default for Spectrum {
    fn default() -> Self {
        Self::new(Palette::solid(BLACK, BLACK))
    }
}

impl Spectrum {
    pub fn new(palette: Palette) -> Self {
        let mut spectrum = Self {
            palette,
            foreground: palette.first,
            increments: [0; 3],
            heading: Heading::Second,
        };
        spectrum.reset(palette);
        spectrum
    }

    /// Apply a palette, but only on an effect's first tick.
    ///
    /// Effects call this every tick; outside tick 0 it keeps the walk in
    /// progress.
    pub fn set_palette(&mut self, ticks: u16, palette: Palette) {
        if ticks == 0 {
            self.reset(palette);
        }
    }

    /// Apply a palette unconditionally and restart from the first endpoint
    pub fn reset(&mut self, palette: Palette) {
        let steps = palette.steps.max(1);
        let first = components(palette.first);
        let second = components(palette.second);

        for ((increment, a), b) in self.increments.iter_mut().zip(first).zip(second) {
            let distance = a.abs_diff(b);
            *increment = distance / steps;
            // a truncated increment of 0 would stall the fade forever
            if palette.style != SpectrumStyle::Static && *increment == 0 && distance != 0 {
                *increment = 1;
            }
        }

        self.palette = palette;
        self.foreground = palette.first;
        self.heading = Heading::Second;
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn background(&self) -> Rgb {
        self.palette.background
    }

    /// Current foreground color
    pub const fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub const fn style(&self) -> SpectrumStyle {
        self.palette.style
    }

    /// Per-component increment between shades
    pub const fn increments(&self) -> [u8; 3] {
        self.increments
    }

    /// Move the foreground according to the style
    pub fn advance(&mut self, rng: &mut Xorshift128) {
        match self.palette.style {
            SpectrumStyle::Static => {}
            SpectrumStyle::RandomByTime | SpectrumStyle::RandomByCycle => self.pick_random(rng),
            SpectrumStyle::SmoothByTime | SpectrumStyle::SmoothByCycle => self.walk(),
        }
    }

    /// Jump to a random shade index in `[0, steps]`.
    ///
    /// One index is drawn and applied to each component with its own
    /// increment, so components can land on different fractions.
    #[allow(clippy::cast_possible_truncation)]
    fn pick_random(&mut self, rng: &mut Xorshift128) {
        let steps = self.palette.steps.max(1);
        let index = rng.below(u16::from(steps) + 1);
        if index == u16::from(steps) {
            self.foreground = self.palette.second;
            return;
        }

        let first = components(self.palette.first);
        let second = components(self.palette.second);
        let mut next = [0u8; 3];
        for (i, value) in next.iter_mut().enumerate() {
            let offset = u16::from(self.increments[i]) * index;
            let distance = u16::from(first[i].abs_diff(second[i]));
            // never past the far endpoint
            let offset = offset.min(distance) as u8;
            *value = if first[i] < second[i] {
                first[i] + offset
            } else {
                first[i] - offset
            };
        }
        self.foreground = from_components(next);
    }

    /// Step one increment towards the current heading, turning round at the
    /// endpoint.
    fn walk(&mut self) {
        let target = match self.heading {
            Heading::Second => self.palette.second,
            Heading::First => self.palette.first,
        };

        if self.palette.steps <= 1 {
            self.foreground = target;
            self.turn();
            return;
        }

        let mut reached = false;
        let mut next = components(self.foreground);
        for ((value, target), increment) in next
            .iter_mut()
            .zip(components(target))
            .zip(self.increments)
        {
            if increment == 0 {
                continue;
            }
            let remaining = value.abs_diff(target);
            // snap when the step would leave less than one increment to go
            if remaining < increment.saturating_mul(2) {
                *value = target;
                reached = true;
            } else if *value < target {
                *value += increment;
            } else {
                *value -= increment;
            }
        }

        self.foreground = from_components(next);
        if reached {
            self.turn();
        }
    }

    fn turn(&mut self) {
        self.heading = match self.heading {
            Heading::Second => Heading::First,
            Heading::First => Heading::Second,
        };
    }
}
