mod tests {
    use tlc5940_composer::color::{BLACK, BLUE, GREEN, RED, Rgb, WHITE};
    use tlc5940_composer::effect::{
        AllOff, AllOn, BinaryCounter, Blackout, Counting, CueClock, Direction, Effect,
        EffectSlot, EffectStates, PatternInvert, PatternShift, PeriodicFade, Raindrop, Runner,
        Scene, StartState, rotate_mask,
    };
    use tlc5940_composer::random::Xorshift128;
    use tlc5940_composer::spectrum::{Palette, Spectrum, SpectrumStyle};
    use tlc5940_composer::store::ChannelStore;

    const BACKGROUND: Rgb = BLUE;

    struct Rig<const N: usize> {
        channels: ChannelStore<N>,
        spectrum: Spectrum,
        rng: Xorshift128,
        clock: CueClock,
    }

    impl<const N: usize> Rig<N> {
        fn new() -> Self {
            Self {
                channels: ChannelStore::new(),
                spectrum: Spectrum::new(Palette::solid(BACKGROUND, WHITE)),
                rng: Xorshift128::new(),
                clock: CueClock::default(),
            }
        }

        fn with_style(style: SpectrumStyle) -> Self {
            let mut rig = Self::new();
            rig.spectrum = Spectrum::new(Palette::new(BACKGROUND, RED, GREEN, style, 4));
            rig
        }

        /// Tick indices on which the foreground color moved
        fn foreground_changes<E: Effect>(
            &mut self,
            effect: &E,
            state: &mut E::State,
            ticks: usize,
        ) -> Vec<usize> {
            let mut changes = Vec::new();
            for tick in 0..ticks {
                let before = self.spectrum.foreground();
                self.tick(effect, state);
                if self.spectrum.foreground() != before {
                    changes.push(tick);
                }
            }
            changes
        }

        fn tick<E: Effect>(&mut self, effect: &E, state: &mut E::State) {
            let mut scene = Scene {
                channels: &mut self.channels,
                spectrum: &mut self.spectrum,
                rng: &mut self.rng,
                clock: &mut self.clock,
            };
            effect.step(state, &mut scene);
            self.channels.advance_fades();
        }

        fn lit_mask(&self) -> u16 {
            (0..N)
                .filter(|&fixture| self.channels.current(fixture) == Some(WHITE))
                .fold(0, |mask, fixture| mask | (1 << fixture))
        }

        fn pending_lit(&self) -> usize {
            (0..N)
                .filter(|&fixture| self.channels.pending(fixture) != Some(BACKGROUND))
                .count()
        }

        fn shown(&self) -> usize {
            (0..N)
                .filter(|&fixture| self.channels.current(fixture) != Some(BACKGROUND))
                .count()
        }
    }

    #[test]
    fn test_all_on_and_all_off() {
        let mut rig = Rig::<5>::new();
        rig.tick(&AllOn { fade_in: 0, fade_out: 9 }, &mut ());
        assert!(rig.channels.colors().iter().all(|&color| color == WHITE));
        assert_eq!(rig.clock.off_rate, 9);
        assert_eq!(rig.clock.ticks, 0);
        assert_eq!(rig.clock.auto_advance, 1);

        rig.tick(&AllOff { fade_out: 0 }, &mut ());
        assert!(rig.channels.colors().iter().all(|&color| color == BACKGROUND));
        assert_eq!(rig.clock.auto_advance, 2);
    }

    #[test]
    fn test_blackout_uses_last_fade_out() {
        let mut rig = Rig::<3>::new();
        rig.tick(&AllOn { fade_in: 0, fade_out: 100 }, &mut ());
        rig.tick(&Blackout, &mut ());
        assert_eq!(rig.channels.rate(0), Some(100));
        assert_eq!(rig.channels.current(0), Some(Rgb::new(155, 155, 155)));
        rig.tick(&Blackout, &mut ());
        rig.tick(&Blackout, &mut ());
        assert!(rig.channels.colors().iter().all(|&color| color == BLACK));
    }

    #[test]
    fn test_periodic_fade_alternates() {
        let mut rig = Rig::<2>::new();
        let fade = PeriodicFade { period: 4, fade_in: 0, fade_out: 0 };
        rig.tick(&fade, &mut ());
        assert_eq!(rig.lit_mask(), 0b00);
        rig.tick(&fade, &mut ());
        assert_eq!(rig.lit_mask(), 0b11);
        for _ in 0..3 {
            rig.tick(&fade, &mut ());
        }
        assert_eq!(rig.lit_mask(), 0b00);
        for _ in 0..5 {
            rig.tick(&fade, &mut ());
        }
        assert_eq!(rig.lit_mask(), 0b11);
    }

    #[test]
    fn test_pattern_invert_is_an_involution() {
        let mut rig = Rig::<6>::new();
        let effect = PatternInvert { pattern: 0b010_110, period: 3, fade_in: 0, fade_out: 0 };
        let mut state = Default::default();

        let mut shown = Vec::new();
        for tick in 0..13 {
            rig.tick(&effect, &mut state);
            if tick > 0 && rig.clock.ticks == 1 {
                shown.push(rig.lit_mask());
            }
        }

        assert!(shown.len() >= 4);
        assert_eq!(shown[0], 0b010_110);
        assert_eq!(shown[1], 0b101_001);
        assert_eq!(shown[2], shown[0]);
        assert_eq!(shown[3], shown[1]);
    }

    #[test]
    fn test_rotate_mask_wraps_both_ways() {
        assert_eq!(rotate_mask(0b100_101, 6, Direction::Forward), 0b001_011);
        assert_eq!(rotate_mask(0b100_101, 6, Direction::Backward), 0b110_010);
        assert_eq!(rotate_mask(0b1, 1, Direction::Forward), 0b1);
        assert_eq!(rotate_mask(0xFFFF, 0, Direction::Forward), 0);
    }

    #[test]
    fn test_pattern_shift_rotates_one_per_period() {
        for direction in [Direction::Forward, Direction::Backward] {
            let mut rig = Rig::<5>::new();
            let effect = PatternShift {
                pattern: 0b00_011,
                period: 2,
                fade_in: 0,
                fade_out: 0,
                direction,
                bounce: false,
            };
            let mut state = Default::default();

            let mut shown = Vec::new();
            for tick in 0..20 {
                rig.tick(&effect, &mut state);
                if tick > 0 && rig.clock.ticks == 1 {
                    shown.push(rig.lit_mask());
                }
            }

            assert_eq!(shown[0], 0b00_011);
            for pair in shown.windows(2) {
                assert_eq!(pair[1], rotate_mask(pair[0], 5, direction));
            }
        }
    }

    #[test]
    fn test_pattern_shift_bounces_at_the_ends() {
        let mut rig = Rig::<4>::new();
        let effect = PatternShift {
            pattern: 0b0001,
            period: 1,
            fade_in: 0,
            fade_out: 0,
            direction: Direction::Forward,
            bounce: true,
        };
        let mut state = Default::default();

        let mut shown = Vec::new();
        for tick in 0..14 {
            rig.tick(&effect, &mut state);
            if tick > 0 && rig.clock.ticks == 1 {
                shown.push(rig.lit_mask());
            }
        }

        assert_eq!(
            &shown[..7],
            &[0b0001, 0b0010, 0b0100, 0b1000, 0b0100, 0b0010, 0b0001]
        );
    }

    #[test]
    fn test_runner_lights_fixtures_in_order() {
        let mut rig = Rig::<4>::new();
        let runner = Runner { period: 2, fade_in: 0, fade_out: 0, ..Default::default() };
        let mut state = Default::default();

        let mut order = Vec::new();
        for _ in 0..16 {
            rig.tick(&runner, &mut state);
            let mask = rig.lit_mask();
            if mask != 0 && order.last() != Some(&mask) {
                order.push(mask);
            }
        }
        assert_eq!(&order[..5], &[0b0001, 0b0010, 0b0100, 0b1000, 0b0001]);
    }

    #[test]
    fn test_runner_backward_starts_at_the_end() {
        let mut rig = Rig::<4>::new();
        let runner = Runner {
            period: 1,
            direction: Direction::Backward,
            ..Default::default()
        };
        let mut state = Default::default();
        rig.tick(&runner, &mut state);
        assert_eq!(rig.lit_mask(), 0b1000);
        rig.tick(&runner, &mut state);
        assert_eq!(rig.lit_mask(), 0b0100);
    }

    #[test]
    fn test_runner_with_wait_shows_one_fixture_at_a_time() {
        let mut rig = Rig::<6>::new();
        let runner = Runner {
            period: 10,
            direction: Direction::Forward,
            fade_in: 255,
            fade_out: 255,
            wait: true,
            bounce: false,
        };
        let mut state = Default::default();

        for tick in 0..300 {
            rig.tick(&runner, &mut state);
            if tick > 2 {
                assert!(rig.shown() <= 1, "tick {}", tick);
            }
        }
    }

    #[test]
    fn test_runner_with_wait_and_bounce_reverses() {
        let mut rig = Rig::<3>::new();
        let runner = Runner {
            period: 2,
            fade_in: 0,
            fade_out: 255,
            wait: true,
            bounce: true,
            ..Default::default()
        };
        let mut state = Default::default();

        let mut order = Vec::new();
        for _ in 0..20 {
            rig.tick(&runner, &mut state);
            let mask = rig.lit_mask();
            if mask != 0 && order.last() != Some(&mask) {
                order.push(mask);
            }
        }
        assert_eq!(&order[..5], &[0b001, 0b010, 0b100, 0b010, 0b001]);
    }

    #[test]
    fn test_counting_lights_one_by_one() {
        let mut rig = Rig::<4>::new();
        let counting = Counting { min_period: 2, ..Default::default() };
        let mut state = Default::default();

        let mut masks = Vec::new();
        for _ in 0..20 {
            rig.tick(&counting, &mut state);
            let mask = rig.lit_mask();
            if masks.last() != Some(&mask) {
                masks.push(mask);
            }
        }
        assert_eq!(masks, [0b0000, 0b0001, 0b0011, 0b0111, 0b1111]);
    }

    #[test]
    fn test_counting_from_lit_darkens_backwards() {
        let mut rig = Rig::<3>::new();
        let counting = Counting {
            min_period: 1,
            direction: Direction::Backward,
            start: StartState::Lit,
            ..Default::default()
        };
        let mut state = Default::default();

        let mut masks = Vec::new();
        for _ in 0..12 {
            rig.tick(&counting, &mut state);
            let mask = rig.lit_mask();
            if masks.last() != Some(&mask) {
                masks.push(mask);
            }
        }
        assert_eq!(masks, [0b111, 0b011, 0b001, 0b000]);
    }

    #[test]
    fn test_counting_ping_pong() {
        let mut rig = Rig::<3>::new();
        let counting = Counting {
            min_period: 1,
            looped: true,
            reverse_on_loop: true,
            swap_on_loop: true,
            ..Default::default()
        };
        let mut state = Default::default();

        let mut masks = Vec::new();
        for _ in 0..30 {
            rig.tick(&counting, &mut state);
            let mask = rig.lit_mask();
            if masks.last() != Some(&mask) {
                masks.push(mask);
            }
        }
        assert_eq!(
            &masks[..7],
            &[0b000, 0b001, 0b011, 0b111, 0b011, 0b001, 0b000]
        );
    }

    #[test]
    fn test_raindrop_limits_lit_fixtures() {
        let mut rig = Rig::<9>::new();
        let raindrop = Raindrop { min_period: 3, number_on: 2, fade_in: 40, fade_out: 30, wait: false };
        let mut state = Default::default();

        for _ in 0..500 {
            rig.tick(&raindrop, &mut state);
            assert!(rig.pending_lit() <= 2);
        }
    }

    #[test]
    fn test_raindrop_wait_clears_before_redrawing() {
        let mut rig = Rig::<9>::new();
        let raindrop = Raindrop { min_period: 1, number_on: 3, fade_in: 60, fade_out: 60, wait: true };
        let mut state = Default::default();

        let mut drawn = 0;
        let mut previous: Vec<usize> = Vec::new();
        for _ in 0..400 {
            rig.tick(&raindrop, &mut state);
            assert!(rig.pending_lit() <= 3);
            if state.drops() != previous.as_slice() {
                drawn += 1;
                previous = state.drops().to_vec();
            }
        }
        assert!(drawn > 3);
    }

    #[test]
    fn test_binary_counter_counts_up_then_down() {
        let mut rig = Rig::<2>::new();
        let counter = BinaryCounter { period: 1, fade_in: 0, fade_out: 0 };
        let mut state = Default::default();

        let mut shown = Vec::new();
        for tick in 0..16 {
            rig.tick(&counter, &mut state);
            if tick > 0 && rig.clock.ticks == 1 {
                shown.push(rig.lit_mask());
            }
        }
        assert_eq!(&shown[..7], &[0, 1, 2, 3, 2, 1, 0]);
    }

    #[test]
    fn test_switching_effects_keeps_other_states() {
        let mut rig = Rig::<5>::new();
        let mut states = EffectStates::default();
        let runner = EffectSlot::Runner(Runner { period: 1, ..Default::default() });
        let fill = EffectSlot::AllOn(AllOn::default());

        for _ in 0..3 {
            let mut scene = Scene {
                channels: &mut rig.channels,
                spectrum: &mut rig.spectrum,
                rng: &mut rig.rng,
                clock: &mut rig.clock,
            };
            runner.step(&mut states, &mut scene);
        }
        let position = states.runner.position();
        assert_eq!(position, 3);

        let mut scene = Scene {
            channels: &mut rig.channels,
            spectrum: &mut rig.spectrum,
            rng: &mut rig.rng,
            clock: &mut rig.clock,
        };
        fill.step(&mut states, &mut scene);
        assert_eq!(states.runner.position(), position);
        assert_eq!(fill.name(), "all_on");
        assert_eq!(runner.name(), "runner");
    }

    #[test]
    fn test_effects_count_auto_advance() {
        let mut rig = Rig::<3>::new();
        let mut state = Default::default();
        let pattern = PatternInvert { pattern: 0b101, period: 2, fade_in: 0, fade_out: 0 };
        for _ in 0..10 {
            rig.tick(&pattern, &mut state);
        }
        assert_eq!(rig.clock.auto_advance, 10);
    }

    #[test]
    fn test_rotate_mask_stays_within_sixteen_bits() {
        assert_eq!(rotate_mask(0x8000, 20, Direction::Forward), 0x0001);
        assert_eq!(rotate_mask(0x0001, 20, Direction::Backward), 0x8000);
        assert_eq!(rotate_mask(0x0003, 20, Direction::Forward), 0x0006);
    }

    #[test]
    fn test_pattern_shift_on_a_long_row() {
        for bounce in [false, true] {
            let mut rig = Rig::<20>::new();
            let effect = PatternShift {
                pattern: 0b1,
                period: 1,
                fade_in: 0,
                fade_out: 0,
                direction: Direction::Forward,
                bounce,
            };
            let mut state = Default::default();

            for _ in 0..40 {
                rig.tick(&effect, &mut state);
                let tail_dark =
                    (16..20).all(|fixture| rig.channels.current(fixture) == Some(BACKGROUND));
                assert!(tail_dark);
                assert!(rig.pending_lit() <= 1);
            }
        }
    }

    #[test]
    fn test_raindrop_caps_the_drop_count() {
        let mut rig = Rig::<20>::new();
        let raindrop = Raindrop { min_period: 5, number_on: 40, fade_in: 0, fade_out: 0, wait: false };
        let mut state = Default::default();
        rig.tick(&raindrop, &mut state);
        assert_eq!(state.drops().len(), 16);
        assert!(rig.pending_lit() <= 16);
    }

    #[test]
    fn test_periodic_fade_moves_spectrum_when_turning_back() {
        let mut rig = Rig::<2>::with_style(SpectrumStyle::SmoothByTime);
        let fade = PeriodicFade { period: 3, fade_in: 0, fade_out: 0 };
        assert_eq!(rig.foreground_changes(&fade, &mut (), 12), [3, 9]);
    }

    #[test]
    fn test_runner_spectrum_by_time_moves_on_every_beat() {
        let mut rig = Rig::<4>::with_style(SpectrumStyle::SmoothByTime);
        let runner = Runner { period: 2, ..Default::default() };
        let mut state = Default::default();
        assert_eq!(rig.foreground_changes(&runner, &mut state, 10), [0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_runner_spectrum_by_cycle_moves_on_wrap() {
        let mut rig = Rig::<4>::with_style(SpectrumStyle::SmoothByCycle);
        let runner = Runner { period: 2, ..Default::default() };
        let mut state = Default::default();
        assert_eq!(rig.foreground_changes(&runner, &mut state, 18), [8, 16]);
    }

    #[test]
    fn test_counting_spectrum_by_time_moves_per_step() {
        let mut rig = Rig::<3>::with_style(SpectrumStyle::SmoothByTime);
        let counting = Counting { min_period: 1, ..Default::default() };
        let mut state = Default::default();
        assert_eq!(rig.foreground_changes(&counting, &mut state, 8), [1, 2, 3, 4]);
    }

    #[test]
    fn test_counting_spectrum_by_cycle_moves_on_loop() {
        let mut rig = Rig::<3>::with_style(SpectrumStyle::SmoothByCycle);
        let counting = Counting { min_period: 1, looped: true, ..Default::default() };
        let mut state = Default::default();
        assert_eq!(rig.foreground_changes(&counting, &mut state, 11), [5, 10]);
    }

    #[test]
    fn test_counting_spectrum_by_cycle_moves_once_per_ping_pong() {
        let mut rig = Rig::<3>::with_style(SpectrumStyle::SmoothByCycle);
        let counting = Counting {
            min_period: 1,
            looped: true,
            reverse_on_loop: true,
            swap_on_loop: true,
            ..Default::default()
        };
        let mut state = Default::default();
        assert_eq!(rig.foreground_changes(&counting, &mut state, 16), [10]);
    }

    #[test]
    fn test_raindrop_spectrum_moves_on_redraw() {
        let mut rig = Rig::<5>::with_style(SpectrumStyle::SmoothByTime);
        let raindrop = Raindrop { min_period: 2, number_on: 1, fade_in: 0, fade_out: 0, wait: false };
        let mut state = Default::default();
        assert_eq!(rig.foreground_changes(&raindrop, &mut state, 9), [2, 4, 6, 8]);
    }

    #[test]
    fn test_pattern_effects_move_spectrum_every_tick() {
        let mut rig = Rig::<4>::with_style(SpectrumStyle::SmoothByTime);
        let invert = PatternInvert { pattern: 0b0101, period: 3, fade_in: 0, fade_out: 0 };
        let mut state = Default::default();
        let changes = rig.foreground_changes(&invert, &mut state, 9);
        assert_eq!(changes, (0..9).collect::<Vec<_>>());

        let mut rig = Rig::<4>::with_style(SpectrumStyle::SmoothByCycle);
        let shift = PatternShift { pattern: 0b0001, period: 2, ..Default::default() };
        let mut state = Default::default();
        let changes = rig.foreground_changes(&shift, &mut state, 9);
        assert_eq!(changes, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_counting_wait_fades_one_fixture_at_a_time() {
        let sweeps = [
            (Direction::Forward, [0usize, 1, 2]),
            (Direction::Backward, [2, 1, 0]),
        ];
        for (direction, expected) in sweeps {
            let mut rig = Rig::<3>::new();
            rig.tick(&AllOff { fade_out: 0 }, &mut ());

            let counting = Counting {
                min_period: 1,
                direction,
                fade_in: 60,
                fade_out: 60,
                wait: true,
                ..Default::default()
            };
            let mut state = Default::default();

            let mut order = Vec::new();
            for tick in 0..40 {
                rig.tick(&counting, &mut state);
                let fading = (0..3).filter(|&fixture| !rig.channels.is_settled(fixture)).count();
                assert!(fading <= 1, "tick {}", tick);
                for fixture in 0..3 {
                    if rig.channels.pending(fixture) == Some(WHITE) && !order.contains(&fixture) {
                        order.push(fixture);
                    }
                }
            }
            assert_eq!(order, expected);
        }
    }
}
