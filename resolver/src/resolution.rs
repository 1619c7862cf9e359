//! The core history-to-status derivation.

use serde::{Deserialize, Serialize};

use veriflow_types::{KycRecord, VerificationLevel, VerificationStatus};

/// The derived status of one tier, from the caller's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelResolution {
    /// Approved at this tier.
    Completed,
    /// A submission at this tier is awaiting a decision.
    Pending,
    /// The tier the user is actively progressing toward.
    ///
    /// Never produced by [`resolve`]; assigned by
    /// [`crate::resolve_all`] as a display upgrade of `Available`.
    Current,
    /// Attemptable right now.
    Available,
    /// Not attemptable until lower tiers progress.
    Locked,
}

/// Derive the status of `target` from the user's verification history.
///
/// `history` is `None` when it has not been loaded yet; that and an empty
/// slice both mean the cold-start rule applies: the entry tier is
/// attemptable, everything above it is locked.
///
/// When multiple records exist for the same tier, the most recently
/// updated one wins. Resolution is total: every input maps to a status,
/// never a panic or a partial result.
pub fn resolve(history: Option<&[KycRecord]>, target: VerificationLevel) -> LevelResolution {
    // The zero tier is held by everyone.
    if target == VerificationLevel::None {
        return LevelResolution::Completed;
    }

    let records = history.unwrap_or(&[]);
    if records.is_empty() {
        return if target == VerificationLevel::Basic {
            LevelResolution::Available
        } else {
            LevelResolution::Locked
        };
    }

    // Latest attempt at the target tier, if any.
    if let Some(record) = records
        .iter()
        .filter(|r| r.level == target)
        .max_by_key(|r| r.updated_at)
    {
        return match record.status {
            VerificationStatus::Approved => LevelResolution::Completed,
            s if s.is_in_flight() => LevelResolution::Pending,
            // Rejected, Blocked, NotStarted: the tier can be (re)attempted.
            _ => LevelResolution::Available,
        };
    }

    // No attempt at the target tier: decide by position relative to the
    // highest approved tier, with the pending-below unlock.
    let highest_approved = records
        .iter()
        .filter(|r| r.status == VerificationStatus::Approved)
        .map(|r| r.level.ordinal())
        .max()
        .unwrap_or(0);

    let target_ordinal = target.ordinal();
    let pending_below = records
        .iter()
        .any(|r| r.level.ordinal() + 1 == target_ordinal && r.status.is_in_flight());

    if target_ordinal == highest_approved + 1
        || pending_below
        || target_ordinal <= highest_approved
    {
        LevelResolution::Available
    } else {
        LevelResolution::Locked
    }
}

/// The user's current tier: the highest tier with an approved record.
///
/// Progression is monotonic in tier value, not in time. When approvals
/// exist at several tiers, the one with the highest ordinal wins even if
/// a lower tier was approved more recently.
pub fn current_level(history: Option<&[KycRecord]>) -> VerificationLevel {
    history
        .unwrap_or(&[])
        .iter()
        .filter(|r| r.status == VerificationStatus::Approved)
        .map(|r| r.level)
        .max()
        .unwrap_or(VerificationLevel::None)
}
