use std::{fmt::Display, ops::RangeInclusive};

use crate::error::ScanError;

pub const DEFAULT_START_PORT: u16 = 1;
pub const DEFAULT_END_PORT: u16 = 1024;

const MIN_PORT: u32 = 1;
const MAX_PORT: u32 = u16::MAX as u32;

/// Inclusive range of ports to scan. Can only be built through [`PortRange::new`],
/// so any value of this type is already valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Validates the bounds: both must be in [1, 65535] and `start <= end`.
    pub fn new(start: u32, end: u32) -> Result<Self, ScanError> {
        if start < MIN_PORT || end > MAX_PORT || start > end {
            return Err(ScanError::InvalidRange(start, end));
        }

        Ok(Self {
            start: start as u16,
            end: end as u16,
        })
    }

    #[inline]
    pub fn start(&self) -> u16 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u16 {
        self.end
    }

    #[inline]
    pub fn contains(&self, port: u16) -> bool {
        (self.start..=self.end).contains(&port)
    }

    /// Number of ports in the range. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PORT,
            end: DEFAULT_END_PORT,
        }
    }
}

impl Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parses a port given on the command line.
///
/// Values that don't fit in a port number are still accepted here so the range
/// check can report them, e.g. `70000`.
pub fn parse(raw: &str) -> Result<u32, ScanError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ScanError::InvalidPort(raw.into()))
}
