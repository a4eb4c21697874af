mod tests {
    use embassy_time::Duration;
    use ws2812_ring_ctrl::decode::{Frame, WireDecoder};
    use ws2812_ring_ctrl::timing::{ConfigError, ProtocolTimings};
    use ws2812_ring_ctrl::{OutputLine, PulseMode, Rgb, RingConfig, RingController, RingRegisters};

    const CLOCK_HZ: u32 = 24_000_000;

    fn config(rotation: Duration) -> RingConfig {
        RingConfig {
            clock_hz: CLOCK_HZ,
            chain_len: 12,
            mode: PulseMode::Single,
            rotation_period: rotation,
            // GRB word 0x201030.
            color: Rgb::new(0x10, 0x20, 0x30),
        }
    }

    fn collect_frames(
        controller: &mut RingController<'_>,
        ticks: u32,
    ) -> Vec<Frame<12>> {
        let timings = ProtocolTimings::for_clock(CLOCK_HZ).unwrap();
        let mut decoder = WireDecoder::<12>::new(timings, CLOCK_HZ);
        let mut frames = Vec::new();
        for _ in 0..ticks {
            let high = controller.tick();
            if let Some(frame) = decoder.tick(high) {
                frames.push(frame);
            }
        }
        frames
    }

    fn lit_position(frame: &Frame<12>) -> Option<usize> {
        frame.iter().position(|word| *word != 0)
    }

    #[test]
    fn test_default_config_constructs() {
        let regs = RingRegisters::new();
        let controller = RingController::new(&regs, &RingConfig::default()).unwrap();
        assert_eq!(controller.pattern().count_ones(), 1);
        // CSR-style reset value: dim green.
        assert_eq!(regs.color(), 0x40_0000);
    }

    #[test]
    fn test_zero_rotation_period_rejected() {
        let regs = RingRegisters::new();
        let result = RingController::new(&regs, &config(Duration::from_micros(0)));
        assert_eq!(result.unwrap_err(), ConfigError::ZeroTickTimer);
    }

    #[test]
    fn test_rotation_walks_the_dot() {
        let regs = RingRegisters::new();
        // 2 ms rotation: roughly four frames per step at this clock.
        let mut controller =
            RingController::new(&regs, &config(Duration::from_millis(2))).unwrap();

        let frames = collect_frames(&mut controller, 400_000);
        assert!(frames.len() > 10, "expected a steady stream of frames");

        let mut positions = Vec::new();
        for frame in &frames {
            assert_eq!(frame.len(), 12);
            let lit = lit_position(frame).expect("one element must be lit");
            assert_eq!(frame[lit], 0x20_1030);
            if positions.last() != Some(&lit) {
                positions.push(lit);
            }
        }
        assert!(positions.len() >= 4, "dot never moved: {positions:?}");
        // Left-rotating the mask walks the lit element towards the
        // head, one position per rotation.
        for pair in positions.windows(2) {
            assert_eq!(pair[1], (pair[0] + 11) % 12);
        }
    }

    #[test]
    fn test_double_mode_lights_opposed_elements() {
        let regs = RingRegisters::new();
        let mut cfg = config(Duration::from_millis(50));
        cfg.mode = PulseMode::Double;
        let mut controller = RingController::new(&regs, &cfg).unwrap();

        let frames = collect_frames(&mut controller, 30_000);
        let frame = frames.first().expect("one frame");
        let lit: Vec<usize> = (0..12).filter(|&i| frame[i] != 0).collect();
        assert_eq!(lit, vec![0, 6]);
    }

    #[test]
    fn test_color_write_applies_to_later_frames() {
        let regs = RingRegisters::new();
        let mut controller =
            RingController::new(&regs, &config(Duration::from_millis(50))).unwrap();

        let before = collect_frames(&mut controller, 30_000);
        assert_eq!(before.last().and_then(lit_position), Some(0));

        regs.set_rgb(Rgb::new(0xFF, 0, 0));
        // Skip one frame: the write may land mid-scan.
        collect_frames(&mut controller, 15_000);

        let after = collect_frames(&mut controller, 30_000);
        let frame = after.last().expect("one frame");
        let lit = lit_position(frame).unwrap();
        assert_eq!(frame[lit], 0x00_FF00);
    }

    #[test]
    fn test_rotation_faster_than_scan_stays_decoupled() {
        // A rotation period shorter than a full scan is allowed; frames
        // keep their shape, the dot just skips positions.
        let regs = RingRegisters::new();
        let mut controller =
            RingController::new(&regs, &config(Duration::from_micros(200))).unwrap();

        let frames = collect_frames(&mut controller, 100_000);
        assert!(frames.len() > 3);
        for frame in &frames {
            assert_eq!(frame.len(), 12);
            assert_eq!(frame.iter().filter(|w| **w != 0).count(), 1);
        }
    }

    #[test]
    fn test_frames_counter_advances() {
        let regs = RingRegisters::new();
        let mut controller =
            RingController::new(&regs, &config(Duration::from_millis(50))).unwrap();
        let frames = collect_frames(&mut controller, 50_000);
        assert!(controller.frames() as usize >= frames.len());
        assert!(controller.frames() >= 2);
    }

    struct Capture(Vec<bool>);

    impl OutputLine for Capture {
        fn set(&mut self, high: bool) {
            self.0.push(high);
        }
    }

    #[test]
    fn test_drive_emits_one_level_per_tick() {
        let regs = RingRegisters::new();
        let mut controller =
            RingController::new(&regs, &config(Duration::from_millis(50))).unwrap();
        let mut line = Capture(Vec::new());
        for _ in 0..2_000 {
            controller.drive(&mut line);
        }
        assert_eq!(line.0.len(), 2_000);
        // The frame starts with the reset gap: 1800 low ticks at 24 MHz.
        assert!(line.0[..1_800].iter().all(|high| !high));
        assert!(line.0[1_800..].iter().any(|high| *high));
    }
}
