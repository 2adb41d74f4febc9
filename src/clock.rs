//! Clock generator (PLL) configuration
//!
//! Fixed frequency presets and the bring-up sequence that applies one. The
//! sequence is expressed over the [`PllControl`] trait so its ordering and
//! fail-fast behavior can be checked on the host against a mock; the board
//! implementation lives in [`crate::drivers::clockgen`].
//!
//! Bring-up walks a fixed path:
//!
//! ```text
//! uninitialized -> reset -> bypassed -> configured -> stabilizing -> enabled
//! ```
//!
//! The first failing step aborts the remaining steps and its status is
//! returned unchanged. There are no retries and no runtime frequency
//! negotiation; presets are compile-time constants.

/// Raw register values selecting one fixed output frequency
///
/// The four fields map one-to-one onto the generator's tuning registers.
/// Values are taken from the datasheet tables and differ between silicon
/// revisions; they are transcribed, never computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PllPreset {
    /// Feedback multiplier field
    pub multiplier: u16,
    /// Reference divider field
    pub divider: u16,
    /// Clock mode field
    pub clock_mode: u16,
    /// Output post-divider field
    pub post_divider: u16,
}

impl PllPreset {
    /// Build a preset from the four raw register fields
    #[must_use]
    pub const fn new(multiplier: u16, divider: u16, clock_mode: u16, post_divider: u16) -> Self {
        Self {
            multiplier,
            divider,
            clock_mode,
            post_divider,
        }
    }

    /// Look up the datasheet preset for a rate on a given silicon revision
    #[must_use]
    pub const fn for_rate(rate: ClockRate, rev: ChipRev) -> Self {
        match rev {
            ChipRev::RevA => match rate {
                ClockRate::Khz12288 => Self::new(0x82ED, 0x8000, 0x0806, 0x0200),
                ClockRate::Mhz40 => Self::new(0x8262, 0x8000, 0x0806, 0x0300),
                ClockRate::Mhz60 => Self::new(0x81C8, 0xB000, 0x0806, 0x0000),
                ClockRate::Mhz75 => Self::new(0x823B, 0x9000, 0x0806, 0x0000),
                ClockRate::Mhz100 => Self::new(0x82FA, 0x8000, 0x0806, 0x0000),
                ClockRate::Mhz120 => Self::new(0x8392, 0xA000, 0x0806, 0x0000),
            },
            ChipRev::RevB => match rate {
                ClockRate::Khz12288 => Self::new(0x8173, 0x8000, 0x0806, 0x0000),
                ClockRate::Mhz40 => Self::new(0x8988, 0x8000, 0x0806, 0x0201),
                ClockRate::Mhz60 => Self::new(0x8724, 0x8000, 0x0806, 0x0000),
                ClockRate::Mhz75 => Self::new(0x88ED, 0x8000, 0x0806, 0x0000),
                ClockRate::Mhz100 => Self::new(0x8BE8, 0x8000, 0x0806, 0x0000),
                ClockRate::Mhz120 => Self::new(0x8E4A, 0x8000, 0x0806, 0x0000),
            },
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PllPreset {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "mult=0x{:04X} div=0x{:04X} mode=0x{:04X} post=0x{:04X}",
            self.multiplier,
            self.divider,
            self.clock_mode,
            self.post_divider
        );
    }
}

/// Named output frequencies with a preset in both register encodings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockRate {
    /// 12.288 MHz (audio-rate reference)
    Khz12288,
    /// 40 MHz
    Mhz40,
    /// 60 MHz
    Mhz60,
    /// 75 MHz
    Mhz75,
    /// 100 MHz
    Mhz100,
    /// 120 MHz
    Mhz120,
}

impl ClockRate {
    /// Target output frequency in Hz
    #[must_use]
    pub const fn hz(self) -> u32 {
        match self {
            Self::Khz12288 => 12_288_000,
            Self::Mhz40 => 40_000_000,
            Self::Mhz60 => 60_000_000,
            Self::Mhz75 => 75_000_000,
            Self::Mhz100 => 100_000_000,
            Self::Mhz120 => 120_000_000,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ClockRate {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Khz12288 => defmt::write!(f, "12.288 MHz"),
            Self::Mhz40 => defmt::write!(f, "40 MHz"),
            Self::Mhz60 => defmt::write!(f, "60 MHz"),
            Self::Mhz75 => defmt::write!(f, "75 MHz"),
            Self::Mhz100 => defmt::write!(f, "100 MHz"),
            Self::Mhz120 => defmt::write!(f, "120 MHz"),
        }
    }
}

/// Register encoding revision of the clock generator silicon
///
/// Two revisions of the part are in the field with different field
/// encodings; the board's fitted revision is named in `config`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipRev {
    /// Original silicon
    RevA,
    /// Revised silicon with re-encoded tuning fields
    RevB,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChipRev {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::RevA => defmt::write!(f, "rev A"),
            Self::RevB => defmt::write!(f, "rev B"),
        }
    }
}

/// The clock generator control primitives, in the order bring-up uses them
pub trait PllControl {
    /// Error produced by the underlying register access
    type Error;

    /// Acquire the hardware and check that it responds
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Reset the PLL block
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Pass the reference clock through unmodified while reconfiguring
    fn bypass(&mut self) -> Result<(), Self::Error>;

    /// Write one frequency preset to the tuning registers
    fn configure(&mut self, preset: &PllPreset) -> Result<(), Self::Error>;

    /// Read the tuning registers back
    fn read_config(&mut self) -> Result<PllPreset, Self::Error>;

    /// Switch the output from bypass to the PLL
    fn enable(&mut self) -> Result<(), Self::Error>;
}

/// Run the full PLL bring-up sequence against `pll`
///
/// `stabilize` runs after the preset is written and before the hardware is
/// touched again; on the board it is a fixed busy-wait, in tests a no-op.
/// The configuration read back from the hardware is returned so the caller
/// can compare it against `preset`; a mismatch is not an error here. The
/// first failing primitive short-circuits the sequence and its error is
/// returned unchanged.
///
/// # Errors
///
/// Whatever the first failing primitive returned.
pub fn apply_clock_config<P: PllControl>(
    pll: &mut P,
    preset: &PllPreset,
    stabilize: impl FnOnce(),
) -> Result<PllPreset, P::Error> {
    pll.init()?;
    pll.reset()?;
    pll.bypass()?;
    pll.configure(preset)?;
    stabilize();
    let applied = pll.read_config()?;
    pll.enable()?;
    Ok(applied)
}
