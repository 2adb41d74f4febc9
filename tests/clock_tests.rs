//! Clock Configuration Tests
//!
//! Verifies the PLL bring-up ordering, fail-fast behavior, and the
//! frequency preset tables.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test clock_tests

use vsense_bringup::clock::{apply_clock_config, ChipRev, ClockRate, PllControl, PllPreset};

// =============================================================================
// Mock PLL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MockError(&'static str);

/// Records each primitive invocation; optionally fails at a named step.
#[derive(Default)]
struct MockPll {
    calls: Vec<&'static str>,
    fail_at: Option<&'static str>,
    stored: Option<PllPreset>,
    read_back: Option<PllPreset>,
}

impl MockPll {
    fn failing_at(step: &'static str) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    fn step(&mut self, name: &'static str) -> Result<(), MockError> {
        self.calls.push(name);
        if self.fail_at == Some(name) {
            Err(MockError(name))
        } else {
            Ok(())
        }
    }
}

impl PllControl for MockPll {
    type Error = MockError;

    fn init(&mut self) -> Result<(), MockError> {
        self.step("init")
    }

    fn reset(&mut self) -> Result<(), MockError> {
        self.step("reset")
    }

    fn bypass(&mut self) -> Result<(), MockError> {
        self.step("bypass")
    }

    fn configure(&mut self, preset: &PllPreset) -> Result<(), MockError> {
        self.stored = Some(*preset);
        self.step("configure")
    }

    fn read_config(&mut self) -> Result<PllPreset, MockError> {
        self.step("read_config")?;
        Ok(self.read_back.or(self.stored).unwrap())
    }

    fn enable(&mut self) -> Result<(), MockError> {
        self.step("enable")
    }
}

const PRESET: PllPreset = PllPreset::new(0x8BE8, 0x8000, 0x0806, 0x0000);

const STEPS: [&str; 6] = ["init", "reset", "bypass", "configure", "read_config", "enable"];

// =============================================================================
// Sequencing
// =============================================================================

#[test]
fn primitives_invoked_in_fixed_order() {
    let mut pll = MockPll::default();
    let mut stabilized = false;

    let applied = apply_clock_config(&mut pll, &PRESET, || stabilized = true).unwrap();

    assert_eq!(pll.calls, STEPS);
    assert!(stabilized);
    assert_eq!(applied, PRESET);
}

#[test]
fn read_back_sits_between_configure_and_enable() {
    let mut pll = MockPll::default();
    apply_clock_config(&mut pll, &PRESET, || {}).unwrap();

    let configure = pll.calls.iter().position(|&c| c == "configure").unwrap();
    let read = pll.calls.iter().position(|&c| c == "read_config").unwrap();
    let enable = pll.calls.iter().position(|&c| c == "enable").unwrap();
    assert!(configure < read && read < enable);
}

#[test]
fn configured_preset_reaches_the_hardware() {
    let mut pll = MockPll::default();
    apply_clock_config(&mut pll, &PRESET, || {}).unwrap();
    assert_eq!(pll.stored, Some(PRESET));
}

// =============================================================================
// Fail-Fast Behavior
// =============================================================================

#[test]
fn failure_short_circuits_remaining_steps() {
    for (i, step) in STEPS.iter().copied().enumerate() {
        let mut pll = MockPll::failing_at(step);
        let err = apply_clock_config(&mut pll, &PRESET, || {}).unwrap_err();

        // the failing status comes back unchanged
        assert_eq!(err, MockError(step));
        // nothing runs after the failing step
        assert_eq!(pll.calls.len(), i + 1, "no primitive may run after {step}");
        assert_eq!(pll.calls.last(), Some(&step));
    }
}

#[test]
fn stabilize_skipped_when_configure_fails() {
    let mut pll = MockPll::failing_at("configure");
    let mut stabilized = false;

    let _ = apply_clock_config(&mut pll, &PRESET, || stabilized = true);

    assert!(!stabilized);
}

#[test]
fn stabilize_runs_before_read_back() {
    // a failing read_config must still see the stabilization delay done
    let mut pll = MockPll::failing_at("read_config");
    let mut stabilized = false;

    let _ = apply_clock_config(&mut pll, &PRESET, || stabilized = true);

    assert!(stabilized);
}

#[test]
fn mismatched_read_back_is_returned_not_an_error() {
    let other = PllPreset::new(0x8E4A, 0x8000, 0x0806, 0x0000);
    let mut pll = MockPll::default();
    pll.read_back = Some(other);

    let applied = apply_clock_config(&mut pll, &PRESET, || {}).unwrap();

    // verification is the caller's concern, the sequence still completes
    assert_eq!(applied, other);
    assert_eq!(pll.calls.last(), Some(&"enable"));
}

// =============================================================================
// Preset Tables
// =============================================================================

#[test]
fn rev_b_100mhz_registers() {
    let p = PllPreset::for_rate(ClockRate::Mhz100, ChipRev::RevB);
    assert_eq!(p, PllPreset::new(0x8BE8, 0x8000, 0x0806, 0x0000));
}

#[test]
fn rev_b_120mhz_registers() {
    let p = PllPreset::for_rate(ClockRate::Mhz120, ChipRev::RevB);
    assert_eq!(p, PllPreset::new(0x8E4A, 0x8000, 0x0806, 0x0000));
}

#[test]
fn rev_a_40mhz_registers() {
    let p = PllPreset::for_rate(ClockRate::Mhz40, ChipRev::RevA);
    assert_eq!(p, PllPreset::new(0x8262, 0x8000, 0x0806, 0x0300));
}

#[test]
fn rev_a_60mhz_registers() {
    let p = PllPreset::for_rate(ClockRate::Mhz60, ChipRev::RevA);
    assert_eq!(p, PllPreset::new(0x81C8, 0xB000, 0x0806, 0x0000));
}

#[test]
fn revisions_encode_the_same_rate_differently() {
    let a = PllPreset::for_rate(ClockRate::Mhz100, ChipRev::RevA);
    let b = PllPreset::for_rate(ClockRate::Mhz100, ChipRev::RevB);
    assert_ne!(a, b);
}

#[test]
fn clock_mode_field_is_common_to_all_presets() {
    for rate in [
        ClockRate::Khz12288,
        ClockRate::Mhz40,
        ClockRate::Mhz60,
        ClockRate::Mhz75,
        ClockRate::Mhz100,
        ClockRate::Mhz120,
    ] {
        for rev in [ChipRev::RevA, ChipRev::RevB] {
            assert_eq!(PllPreset::for_rate(rate, rev).clock_mode, 0x0806);
        }
    }
}

#[test]
fn rate_hz_values() {
    assert_eq!(ClockRate::Khz12288.hz(), 12_288_000);
    assert_eq!(ClockRate::Mhz40.hz(), 40_000_000);
    assert_eq!(ClockRate::Mhz60.hz(), 60_000_000);
    assert_eq!(ClockRate::Mhz75.hz(), 75_000_000);
    assert_eq!(ClockRate::Mhz100.hz(), 100_000_000);
    assert_eq!(ClockRate::Mhz120.hz(), 120_000_000);
}
