mod tests {
    use rand_core::{RngCore, SeedableRng};
    use tlc5940_composer::random::Xorshift128;

    #[test]
    fn test_default_sequence() {
        let mut rng = Xorshift128::new();
        assert_eq!(rng.next_word(), 3_701_687_786);
        assert_eq!(rng.next_word(), 458_299_110);
        assert_eq!(rng.next_word(), 2_500_872_618);
    }

    #[test]
    fn test_below_stays_in_range() {
        let mut rng = Xorshift128::new();
        for bound in [1u16, 2, 9, 10, 1000] {
            for _ in 0..200 {
                assert!(rng.below(bound) < bound);
            }
        }
    }

    #[test]
    fn test_below_zero_is_zero() {
        let mut rng = Xorshift128::new();
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn test_below_covers_range() {
        let mut rng = Xorshift128::new();
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[usize::from(rng.below(9))] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_rng_core_matches_words() {
        let mut a = Xorshift128::new();
        let mut b = Xorshift128::new();
        assert_eq!(a.next_u32(), b.next_word());

        let mut bytes = [0u8; 4];
        a.fill_bytes(&mut bytes);
        assert_eq!(u32::from_le_bytes(bytes), b.next_word());
    }

    #[test]
    fn test_zero_seed_falls_back_to_default() {
        let mut seeded = Xorshift128::from_seed([0; 16]);
        let mut default = Xorshift128::default();
        assert_eq!(seeded.next_u32(), default.next_u32());
    }

    #[test]
    fn test_seed_changes_sequence() {
        let mut seed = [0u8; 16];
        seed[0] = 1;
        seed[12] = 7;
        let mut seeded = Xorshift128::from_seed(seed);
        let mut default = Xorshift128::default();
        assert_ne!(seeded.next_u32(), default.next_u32());
    }
}
