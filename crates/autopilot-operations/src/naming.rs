//! Names of the auxiliary app slots kept next to a live app.

use std::fmt;
use std::str::FromStr;

use crate::OperationError;

/// Slot the previous version is parked in during a zero-downtime push.
#[must_use]
pub fn venerable_app_name(app_name: &str) -> String {
    format!("{app_name}-venerable")
}

#[must_use]
pub fn generation_app_name(app_name: &str, generation: Generation) -> String {
    format!("{app_name}-{generation}")
}

/// Temporary name used while two apps exchange names.
#[must_use]
pub fn swap_placeholder_name(app_name: &str) -> String {
    format!("{app_name}-now-on-swapping")
}

/// A retained blue/green generation. `G1` is the most recent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    G1,
    G2,
}

impl Generation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::G1 => "g1",
            Self::G2 => "g2",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Generation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g1" => Ok(Self::G1),
            "g2" => Ok(Self::G2),
            other => Err(OperationError::InvalidGeneration(other.to_string())),
        }
    }
}
