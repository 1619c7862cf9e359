//! Full per-tier status maps for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use veriflow_types::{KycRecord, VerificationLevel};

use crate::resolution::{current_level, resolve, LevelResolution};

/// The derived status of every attemptable tier.
///
/// Maps built by [`resolve_all`] carry one entry per `Basic..Enhanced`
/// tier; deserialized maps may be partial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelStatusMap(BTreeMap<VerificationLevel, LevelResolution>);

impl LevelStatusMap {
    /// Status of one tier. The zero tier reads as `Completed`; a tier
    /// absent from the map reads as `Locked`.
    pub fn get(&self, level: VerificationLevel) -> LevelResolution {
        if level == VerificationLevel::None {
            return LevelResolution::Completed;
        }
        self.0
            .get(&level)
            .copied()
            .unwrap_or(LevelResolution::Locked)
    }

    /// Iterate tiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (VerificationLevel, LevelResolution)> + '_ {
        self.0.iter().map(|(l, r)| (*l, *r))
    }
}

/// Resolve every attemptable tier at once.
///
/// Statuses come from [`resolve`]; additionally the sequential next tier
/// above the user's current tier is upgraded from `Available` to
/// `Current` so the UI can highlight the step the user is progressing
/// toward. The upgrade applies to at most one tier and only when
/// [`resolve`] already deemed it `Available`.
pub fn resolve_all(history: Option<&[KycRecord]>) -> LevelStatusMap {
    let mut map: BTreeMap<VerificationLevel, LevelResolution> = VerificationLevel::ATTEMPTABLE
        .iter()
        .map(|&level| (level, resolve(history, level)))
        .collect();

    if let Some(next) = current_level(history).next() {
        if map.get(&next) == Some(&LevelResolution::Available) {
            map.insert(next, LevelResolution::Current);
        }
    }

    LevelStatusMap(map)
}
