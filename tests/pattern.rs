mod tests {
    use ws2812_ring_ctrl::pattern::{PatternRotor, PulseMode};
    use ws2812_ring_ctrl::timing::ConfigError;

    #[test]
    fn test_single_mode_starts_at_head() {
        let rotor = PatternRotor::new(12, PulseMode::Single).unwrap();
        assert_eq!(rotor.mask(), 0b1000_0000_0000);
    }

    #[test]
    fn test_double_mode_starts_half_a_chain_apart() {
        let rotor = PatternRotor::new(12, PulseMode::Double).unwrap();
        assert_eq!(rotor.mask(), 0b1000_0010_0000);
    }

    #[test]
    fn test_rotation_wraps_top_bit_to_bottom() {
        let mut rotor = PatternRotor::new(12, PulseMode::Single).unwrap();
        rotor.rotate();
        assert_eq!(rotor.mask(), 0b0000_0000_0001);
        rotor.rotate();
        assert_eq!(rotor.mask(), 0b0000_0000_0010);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut rotor = PatternRotor::new(12, PulseMode::Single).unwrap();
        let start = rotor.mask();
        for _ in 0..12 {
            rotor.rotate();
        }
        assert_eq!(rotor.mask(), start);
    }

    #[test]
    fn test_double_mode_walks_six_positions() {
        // Both bits move together; after 6 rotations of a 12-element
        // chain the pair has walked half the ring, which maps the
        // opposed pair onto itself.
        let mut rotor = PatternRotor::new(12, PulseMode::Double).unwrap();
        let start = rotor.mask();

        for _ in 0..3 {
            rotor.rotate();
        }
        // Bits 11 and 5 have moved to bits 2 and 8.
        assert_eq!(rotor.mask(), (1 << 8) | (1 << 2));

        for _ in 0..3 {
            rotor.rotate();
        }
        assert_eq!(rotor.mask(), start);
    }

    #[test]
    fn test_popcount_invariant() {
        let mut single = PatternRotor::new(12, PulseMode::Single).unwrap();
        let mut double = PatternRotor::new(12, PulseMode::Double).unwrap();
        for _ in 0..25 {
            assert_eq!(single.mask().count_ones(), 1);
            assert_eq!(double.mask().count_ones(), 2);
            single.rotate();
            double.rotate();
        }
    }

    #[test]
    fn test_chain_of_one_rotates_in_place() {
        let mut rotor = PatternRotor::new(1, PulseMode::Single).unwrap();
        rotor.rotate();
        assert_eq!(rotor.mask(), 0b1);
    }

    #[test]
    fn test_full_width_chain() {
        let mut rotor = PatternRotor::new(32, PulseMode::Single).unwrap();
        assert_eq!(rotor.mask(), 1 << 31);
        rotor.rotate();
        assert_eq!(rotor.mask(), 1);
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        assert_eq!(
            PatternRotor::new(0, PulseMode::Single).unwrap_err(),
            ConfigError::EmptyChain
        );
        assert_eq!(
            PatternRotor::new(33, PulseMode::Single).unwrap_err(),
            ConfigError::ChainTooLong
        );
        assert_eq!(
            PatternRotor::new(5, PulseMode::Double).unwrap_err(),
            ConfigError::OddDoubleChain
        );
    }
}
