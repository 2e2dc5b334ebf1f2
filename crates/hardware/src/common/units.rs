//! Unit-carrying scalar types.
//!
//! Parameter values are written the way hardware people write them (`"16kB"`, `"100MB/s"`,
//! `"1GHz"`, `"13.75ns"`). This module parses those strings into canonical integer
//! quantities and formats them back. It provides:
//! 1. **Memory sizes and bandwidths:** Binary prefixes (`kB` = 1024 bytes), canonical byte counts.
//! 2. **Frequencies and voltages:** Decimal prefixes, stored as Hz and millivolts.
//! 3. **Latencies:** Cycle counts or absolute times, stored as ticks of the owning clock domain.
//!
//! Formatting always picks the largest unit that represents the value exactly, so
//! `MemorySize::parse("1024kB")` displays as `1MB`.

use std::fmt;
use std::str::FromStr;

use super::clock::ClockDomain;
use super::constants::TICKS_PER_SECOND;
use super::error::UnitError;

/// Binary memory units, largest first, with their power-of-two shift.
const BINARY_UNITS: [(&str, u32); 4] = [("TB", 40), ("GB", 30), ("MB", 20), ("kB", 10)];

/// Splits `"16 kB"` into `("16", "kB")`.
fn split_magnitude(value: &str) -> Result<(&str, &str), UnitError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UnitError::Empty);
    }
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '_'))
        .unwrap_or(trimmed.len());
    let (num, suffix) = trimmed.split_at(end);
    if num.is_empty() {
        return Err(UnitError::MissingMagnitude(trimmed.to_string()));
    }
    Ok((num, suffix.trim()))
}

fn parse_integer(num: &str, original: &str) -> Result<u64, UnitError> {
    let digits: String = num.chars().filter(|c| *c != '_').collect();
    digits
        .parse::<u64>()
        .map_err(|_| UnitError::InvalidMagnitude(original.trim().to_string()))
}

fn parse_decimal(num: &str, original: &str) -> Result<f64, UnitError> {
    let digits: String = num.chars().filter(|c| *c != '_').collect();
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(UnitError::InvalidMagnitude(original.trim().to_string())),
    }
}

/// Scales a decimal magnitude and rounds it to the nearest integer unit.
fn scale_decimal(magnitude: f64, scale: f64, original: &str) -> Result<u64, UnitError> {
    let scaled = (magnitude * scale).round();
    if scaled >= u64::MAX as f64 {
        return Err(UnitError::Overflow(original.trim().to_string()));
    }
    Ok(scaled as u64)
}

fn binary_multiplier(suffix: &str) -> Option<u64> {
    match suffix {
        "" | "B" => Some(1),
        "k" | "K" | "kB" | "KB" | "KiB" | "kiB" => Some(1 << 10),
        "M" | "MB" | "MiB" => Some(1 << 20),
        "G" | "GB" | "GiB" => Some(1 << 30),
        "T" | "TB" | "TiB" => Some(1 << 40),
        _ => None,
    }
}

fn parse_binary_bytes(value: &str, expected: &'static str) -> Result<u64, UnitError> {
    let (num, suffix) = split_magnitude(value)?;
    let multiplier = binary_multiplier(suffix).ok_or_else(|| UnitError::UnknownSuffix {
        value: value.trim().to_string(),
        suffix: suffix.to_string(),
        expected,
    })?;
    let magnitude = parse_integer(num, value)?;
    magnitude
        .checked_mul(multiplier)
        .ok_or_else(|| UnitError::Overflow(value.trim().to_string()))
}

fn format_binary(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }
    for (unit, shift) in BINARY_UNITS {
        if bytes.trailing_zeros() >= shift {
            return format!("{}{unit}", bytes >> shift);
        }
    }
    format!("{bytes}B")
}

/// Parses a plain count: decimal with optional `_` separators, or `0x`-prefixed hex.
pub fn parse_count(value: &str) -> Result<u64, UnitError> {
    let text = value.trim();
    if text.is_empty() {
        return Err(UnitError::Empty);
    }
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    };
    parsed.map_err(|_| UnitError::InvalidMagnitude(text.to_string()))
}

/// A memory capacity in bytes (`"16kB"`, `"512MB"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemorySize(u64);

impl MemorySize {
    /// Creates a size from a raw byte count.
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Returns the size in bytes.
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Parses a magnitude with an optional binary unit suffix.
    ///
    /// Accepted suffixes are `B`, `kB`/`KB`/`KiB`, `MB`/`MiB`, `GB`/`GiB` and `TB`/`TiB`;
    /// a bare integer is a byte count.
    ///
    /// # Arguments
    ///
    /// * `value` - The textual size, e.g. `"64kB"`.
    ///
    /// # Returns
    ///
    /// The parsed size, or a `UnitError` naming the malformed part.
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        parse_binary_bytes(value, "memory size").map(Self)
    }

    /// Rewrites a size string into its canonical spelling (`"16 KiB"` → `"16kB"`).
    pub fn canonicalize(value: &str) -> Result<String, UnitError> {
        Ok(Self::parse(value)?.to_string())
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_binary(self.0))
    }
}

impl FromStr for MemorySize {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A transfer rate in bytes per second (`"100MB/s"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemoryBandwidth(u64);

impl MemoryBandwidth {
    /// Creates a bandwidth from a raw bytes-per-second count.
    pub const fn from_bytes_per_sec(rate: u64) -> Self {
        Self(rate)
    }

    /// Returns the bandwidth in bytes per second.
    pub const fn bytes_per_sec(self) -> u64 {
        self.0
    }

    /// Parses a binary memory size followed by `/s`.
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        let trimmed = value.trim();
        let per_second = trimmed
            .strip_suffix("/s")
            .ok_or_else(|| UnitError::UnknownSuffix {
                value: trimmed.to_string(),
                suffix: trimmed
                    .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == '_')
                    .to_string(),
                expected: "bandwidth",
            })?;
        parse_binary_bytes(per_second, "bandwidth").map(Self)
    }
}

impl fmt::Display for MemoryBandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/s", format_binary(self.0))
    }
}

impl FromStr for MemoryBandwidth {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A clock frequency in Hz (`"1GHz"`, `"2.5GHz"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u64);

impl Frequency {
    /// Creates a frequency from a raw Hz count.
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Returns the frequency in Hz.
    pub const fn hz(self) -> u64 {
        self.0
    }

    /// Parses a decimal magnitude followed by `Hz`, `kHz`, `MHz` or `GHz`.
    ///
    /// Zero is rejected: a clock domain without a period cannot time anything.
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        let (num, suffix) = split_magnitude(value)?;
        let scale = match suffix {
            "Hz" => 1.0,
            "kHz" => 1e3,
            "MHz" => 1e6,
            "GHz" => 1e9,
            _ => {
                return Err(UnitError::UnknownSuffix {
                    value: value.trim().to_string(),
                    suffix: suffix.to_string(),
                    expected: "frequency",
                });
            }
        };
        let hz = scale_decimal(parse_decimal(num, value)?, scale, value)?;
        if hz == 0 {
            return Err(UnitError::NotPositive(value.trim().to_string()));
        }
        Ok(Self(hz))
    }

    /// Returns the clock period in ticks, rounded down (zero for a zero frequency).
    pub const fn period_ticks(self) -> u64 {
        match TICKS_PER_SECOND.checked_div(self.0) {
            Some(period) => period,
            None => 0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, scale) in [("GHz", 1_000_000_000), ("MHz", 1_000_000), ("kHz", 1_000)] {
            if self.0 % scale == 0 {
                return write!(f, "{}{unit}", self.0 / scale);
            }
        }
        write!(f, "{}Hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A supply voltage, stored in millivolts (`"1V"`, `"0.9V"`, `"850mV"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Voltage(u64);

impl Voltage {
    /// Creates a voltage from millivolts.
    pub const fn from_millivolts(mv: u64) -> Self {
        Self(mv)
    }

    /// Returns the voltage in millivolts.
    pub const fn millivolts(self) -> u64 {
        self.0
    }

    /// Parses a decimal magnitude followed by `V` or `mV`.
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        let (num, suffix) = split_magnitude(value)?;
        let scale = match suffix {
            "V" => 1e3,
            "mV" => 1.0,
            _ => {
                return Err(UnitError::UnknownSuffix {
                    value: value.trim().to_string(),
                    suffix: suffix.to_string(),
                    expected: "voltage",
                });
            }
        };
        scale_decimal(parse_decimal(num, value)?, scale, value).map(Self)
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{}V", self.0 / 1000)
        } else {
            write!(f, "{}mV", self.0)
        }
    }
}

/// A duration in simulated ticks.
///
/// Latencies are written either as a bare cycle count of the owning clock domain (`"2"`),
/// as an absolute time (`"13.75ns"`), or as raw ticks (`"500t"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Latency(u64);

impl Latency {
    /// Creates a latency from a raw tick count.
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Returns the latency in ticks.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Converts a cycle count of `clock` into ticks.
    pub fn from_cycles(cycles: u64, clock: &ClockDomain) -> Result<Self, UnitError> {
        cycles
            .checked_mul(clock.period_ticks())
            .map(Self)
            .ok_or_else(|| UnitError::Overflow(format!("{cycles} cycles")))
    }

    /// Returns the latency as whole cycles of `clock`, rounded down.
    pub const fn cycles(self, clock: &ClockDomain) -> u64 {
        match self.0.checked_div(clock.period_ticks()) {
            Some(cycles) => cycles,
            None => 0,
        }
    }

    /// Parses a latency relative to the given clock domain.
    ///
    /// # Arguments
    ///
    /// * `value` - Cycle count (`"20"`), time (`"1ns"`, `"1.25ns"`, `"10us"`) or ticks (`"7t"`).
    /// * `clock` - The clock domain that gives bare cycle counts their period.
    ///
    /// # Returns
    ///
    /// The latency in ticks.
    pub fn parse(value: &str, clock: &ClockDomain) -> Result<Self, UnitError> {
        let (num, suffix) = split_magnitude(value)?;
        let scale = match suffix {
            "" => return Self::from_cycles(parse_integer(num, value)?, clock),
            "t" => return parse_integer(num, value).map(Self),
            "s" => 1e12,
            "ms" => 1e9,
            "us" => 1e6,
            "ns" => 1e3,
            "ps" => 1.0,
            _ => {
                return Err(UnitError::UnknownSuffix {
                    value: value.trim().to_string(),
                    suffix: suffix.to_string(),
                    expected: "latency",
                });
            }
        };
        scale_decimal(parse_decimal(num, value)?, scale, value).map(Self)
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 == 0 {
            write!(f, "{}ns", self.0 / 1000)
        } else {
            write!(f, "{}ps", self.0)
        }
    }
}
