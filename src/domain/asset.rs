//! Asset selectors for the two sides of the pool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two assets the pool custodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// Token A.
    A,
    /// Token B.
    B,
}

impl Asset {
    /// Returns the opposite side of the pool.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("token A"),
            Self::B => f.write_str("token B"),
        }
    }
}

impl FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "token_a" | "token-a" => Ok(Self::A),
            "b" | "token_b" | "token-b" => Ok(Self::B),
            other => Err(format!("unknown asset: {other}")),
        }
    }
}

/// Direction of a swap through the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Trader sells token A and receives token B.
    AForB,
    /// Trader sells token B and receives token A.
    BForA,
}

impl SwapDirection {
    /// Asset pulled from the trader.
    #[must_use]
    pub const fn source(self) -> Asset {
        match self {
            Self::AForB => Asset::A,
            Self::BForA => Asset::B,
        }
    }

    /// Asset paid out to the trader.
    #[must_use]
    pub const fn destination(self) -> Asset {
        self.source().other()
    }
}
