//! Control-loop pacing.
//!
//! Renders one tick per call and reports how long to wait before the next.
//! The caller is responsible for sleeping between ticks; latching to the chip
//! happens independently on the cycle interrupt.

use embassy_time::{Duration, Instant};

use crate::{OutputDriver, Renderer};

/// Default control-loop rate (250 ticks per second).
pub const DEFAULT_FPS: u64 = 250;

/// Default tick period based on the target rate.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / DEFAULT_FPS);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable tick scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks tick timing with drift correction
/// - Calls the renderer and output driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, writer);
///
/// loop {
///     let result = scheduler.tick(Instant::now())?;
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const FIXTURES: usize> {
    output: O,
    renderer: Renderer<'a, FIXTURES>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const FIXTURES: usize> FrameScheduler<'a, O, FIXTURES> {
    /// Create a new scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (250 ticks per second).
    pub fn new(renderer: Renderer<'a, FIXTURES>, driver: O) -> Self {
        Self::with_frame_duration(renderer, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new scheduler with a custom tick period.
    pub fn with_frame_duration(
        renderer: Renderer<'a, FIXTURES>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            renderer,
            next_frame: Instant::from_ticks(0),
            frame_duration,
        }
    }

    /// Run one tick and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Renders the current tick
    /// 3. Writes to the output driver
    /// 4. Returns the deadline for the next tick
    ///
    /// A failed write is returned as is; the next call retries with the
    /// following tick.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, O::Error> {
        // Skip the backlog after long stalls instead of bursting through it
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.next_frame += self.frame_duration;

        let frame = self.renderer.render();
        self.output.write(frame)?;

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
        })
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<'a, FIXTURES> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<'a, FIXTURES> {
        &mut self.renderer
    }

    /// Get a mutable reference to the output driver.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
