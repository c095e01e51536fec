mod tests {
    use core::convert::Infallible;

    use embassy_time::{Duration, Instant};
    use tlc5940_composer::color::{BLACK, RED, Rgb};
    use tlc5940_composer::cue::{Cue, Step};
    use tlc5940_composer::effect::{AllOn, EffectSlot};
    use tlc5940_composer::frame_scheduler::{DEFAULT_FRAME_DURATION, FrameScheduler};
    use tlc5940_composer::spectrum::Palette;
    use tlc5940_composer::{OutputDriver, Renderer};

    static ON: Step = Step::new(
        Palette::solid(BLACK, RED),
        EffectSlot::AllOn(AllOn { fade_in: 0, fade_out: 0 }),
    );
    static SHOW: [Cue<'static>; 1] = [Cue::single(&ON)];

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        last: Option<Rgb>,
    }

    impl OutputDriver for Recorder {
        type Error = Infallible;

        fn write(&mut self, fixtures: &[Rgb]) -> Result<(), Infallible> {
            self.frames += 1;
            self.last = fixtures.first().copied();
            Ok(())
        }
    }

    struct Broken;

    impl OutputDriver for Broken {
        type Error = &'static str;

        fn write(&mut self, _fixtures: &[Rgb]) -> Result<(), Self::Error> {
            Err("unplugged")
        }
    }

    #[test]
    fn test_default_rate() {
        assert_eq!(DEFAULT_FRAME_DURATION, Duration::from_millis(4));
    }

    #[test]
    fn test_tick_renders_and_paces() {
        let renderer = Renderer::<3>::new(&SHOW);
        let mut scheduler = FrameScheduler::new(renderer, Recorder::default());

        let result = scheduler.tick(Instant::from_millis(0)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(4));
        assert_eq!(result.sleep_duration, Duration::from_millis(4));

        let result = scheduler.tick(Instant::from_millis(5)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(8));
        assert_eq!(result.sleep_duration, Duration::from_millis(3));

        assert_eq!(scheduler.output_mut().frames, 2);
        assert_eq!(scheduler.output_mut().last, Some(RED));
        assert_eq!(scheduler.renderer().clock().auto_advance, 2);
    }

    #[test]
    fn test_tick_skips_backlog_after_stall() {
        let renderer = Renderer::<3>::new(&SHOW);
        let mut scheduler = FrameScheduler::new(renderer, Recorder::default());
        scheduler.tick(Instant::from_millis(0)).unwrap();

        let result = scheduler.tick(Instant::from_millis(100)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(104));
        assert_eq!(result.sleep_duration, Duration::from_millis(4));
    }

    #[test]
    fn test_tick_propagates_driver_error() {
        let renderer = Renderer::<3>::new(&SHOW);
        let mut scheduler =
            FrameScheduler::with_frame_duration(renderer, Broken, Duration::from_millis(10));
        assert_eq!(scheduler.tick(Instant::from_millis(0)).unwrap_err(), "unplugged");
        scheduler.renderer_mut().blackout();
    }
}
