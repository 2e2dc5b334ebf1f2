//! Clock and voltage domain.
//!
//! There is no ambient "current clock": every latency is resolved against an explicit
//! `ClockDomain` value owned by the topology root and passed down to parameter resolution.

use std::fmt;

use super::error::UnitError;
use super::units::{Frequency, Voltage};

/// A source clock together with the voltage domain it runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClockDomain {
    /// Clock frequency; determines the length of one cycle in ticks.
    pub clock: Frequency,
    /// Supply voltage of the domain.
    pub voltage: Voltage,
}

impl ClockDomain {
    /// Creates a clock domain from already-parsed values.
    pub const fn new(clock: Frequency, voltage: Voltage) -> Self {
        Self { clock, voltage }
    }

    /// Parses a clock domain from its textual frequency and voltage (`"1GHz"`, `"1V"`).
    ///
    /// # Arguments
    ///
    /// * `clock` - Frequency string.
    /// * `voltage` - Voltage string.
    ///
    /// # Returns
    ///
    /// The clock domain, or the first `UnitError` encountered.
    pub fn parse(clock: &str, voltage: &str) -> Result<Self, UnitError> {
        Ok(Self {
            clock: Frequency::parse(clock)?,
            voltage: Voltage::parse(voltage)?,
        })
    }

    /// Length of one clock cycle in ticks.
    pub const fn period_ticks(&self) -> u64 {
        self.clock.period_ticks()
    }
}

impl Default for ClockDomain {
    /// 1 GHz at 1 V.
    fn default() -> Self {
        Self {
            clock: Frequency::from_hz(1_000_000_000),
            voltage: Voltage::from_millivolts(1000),
        }
    }
}

impl fmt::Display for ClockDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.clock, self.voltage)
    }
}
