mod tests {
    use tlc5940_composer::gamma::{MAX_DRIVE, PWM_LUT, pwm_value};

    #[test]
    fn test_curve_is_non_decreasing() {
        assert!(PWM_LUT.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_curve_endpoints() {
        assert_eq!(PWM_LUT.len(), 256);
        assert_eq!(pwm_value(0), 0);
        assert_eq!(pwm_value(255), MAX_DRIVE);
    }

    #[test]
    fn test_curve_fits_in_12_bits() {
        assert!(PWM_LUT.iter().all(|&value| value <= 0x0FFF));
    }

    #[test]
    fn test_curve_is_perceptual() {
        // half brightness is far below half drive
        assert!(pwm_value(128) < MAX_DRIVE / 4);
    }
}
