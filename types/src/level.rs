//! Ordered verification tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KycError;

/// A KYC verification tier.
///
/// Tiers form a strict total order: `None < Basic < Standard < Advanced <
/// Enhanced`. Progression logic compares ordinals, never names, so the
/// ordering of the variants is load-bearing.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum VerificationLevel {
    /// The zero tier every user holds without any verification.
    None = 0,
    /// Entry tier: name, date of birth, country.
    Basic = 1,
    /// Document verification.
    Standard = 2,
    /// Proof of address and source of funds.
    Advanced = 3,
    /// Enhanced due diligence.
    Enhanced = 4,
}

impl VerificationLevel {
    /// All tiers in canonical order, lowest first.
    pub const ALL: [VerificationLevel; 5] = [
        VerificationLevel::None,
        VerificationLevel::Basic,
        VerificationLevel::Standard,
        VerificationLevel::Advanced,
        VerificationLevel::Enhanced,
    ];

    /// Tiers a user can actually attempt (everything above `None`).
    pub const ATTEMPTABLE: [VerificationLevel; 4] = [
        VerificationLevel::Basic,
        VerificationLevel::Standard,
        VerificationLevel::Advanced,
        VerificationLevel::Enhanced,
    ];

    /// Position of this tier in the canonical ordering.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The tier directly above this one, or `None` at the top.
    pub fn next(&self) -> Option<VerificationLevel> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Look a tier up by ordinal value.
    pub fn from_ordinal(ordinal: u8) -> Option<VerificationLevel> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// The lowercase wire name of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationLevel::None => "none",
            VerificationLevel::Basic => "basic",
            VerificationLevel::Standard => "standard",
            VerificationLevel::Advanced => "advanced",
            VerificationLevel::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationLevel {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(VerificationLevel::None),
            "basic" => Ok(VerificationLevel::Basic),
            "standard" => Ok(VerificationLevel::Standard),
            "advanced" => Ok(VerificationLevel::Advanced),
            "enhanced" => Ok(VerificationLevel::Enhanced),
            other => Err(KycError::InvalidRecord(format!(
                "unknown verification level: {other}"
            ))),
        }
    }
}
