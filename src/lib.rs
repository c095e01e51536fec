#![no_std]

pub mod color;
pub mod cue;
pub mod effect;
pub mod frame_scheduler;
pub mod gamma;
pub mod latch;
pub mod protocol;
pub mod random;
pub mod renderer;
pub mod spectrum;
pub mod store;
pub mod transition;

pub use cue::{Cue, CueEnd, Step};
pub use effect::{CueClock, Direction, Effect, EffectSlot, EffectStates, Scene};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use gamma::pwm_value;
pub use latch::{CycleHandler, CycleTiming, LatchFlag};
pub use protocol::{
    ClockGate, DotCorrection, GrayscaleWriter, LegOrder, PinError, PinGate, PinRole, Tlc5940,
    Tlc5940Pins,
};
pub use random::Xorshift128;
pub use renderer::Renderer;
pub use spectrum::{Palette, Spectrum, SpectrumStyle};
pub use store::ChannelStore;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract fixture output trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    type Error;

    /// Send the colors of every fixture, in fixture order
    fn write(&mut self, fixtures: &[Rgb]) -> Result<(), Self::Error>;
}
