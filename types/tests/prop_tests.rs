//! Property tests for the primitive verification types.

use proptest::prelude::*;

use veriflow_types::{Timestamp, VerificationLevel, VerificationStatus};

proptest! {
    /// Ordinals and levels convert back and forth without loss.
    #[test]
    fn level_ordinal_roundtrips(ord in 0u8..=4) {
        let level = VerificationLevel::from_ordinal(ord).unwrap();
        prop_assert_eq!(level.ordinal(), ord);
    }

    /// `next()` always moves strictly upward until the ladder tops out.
    #[test]
    fn next_is_strictly_increasing(ord in 0u8..=4) {
        let level = VerificationLevel::from_ordinal(ord).unwrap();
        match level.next() {
            Some(next) => prop_assert!(next > level),
            None => prop_assert_eq!(level, VerificationLevel::Enhanced),
        }
    }

    /// Level names parse back to the level that produced them.
    #[test]
    fn level_name_roundtrips(ord in 0u8..=4) {
        let level = VerificationLevel::from_ordinal(ord).unwrap();
        prop_assert_eq!(level.as_str().parse::<VerificationLevel>().unwrap(), level);
    }

    /// A deadline is past exactly when the clock has reached it.
    #[test]
    fn deadline_is_past_iff_reached(deadline in 0u64..=2_000_000, now in 0u64..=2_000_000) {
        let expires = Timestamp::new(deadline);
        prop_assert_eq!(expires.is_past(Timestamp::new(now)), now >= deadline);
    }

    /// Elapsed time never goes negative and is exact when it applies.
    #[test]
    fn elapsed_since_saturates(start in 0u64..=2_000_000, now in 0u64..=2_000_000) {
        let elapsed = Timestamp::new(start).elapsed_since(Timestamp::new(now));
        if now >= start {
            prop_assert_eq!(elapsed, now - start);
        } else {
            prop_assert_eq!(elapsed, 0);
        }
    }
}

#[test]
fn statuses_in_flight_and_retryable_are_consistent() {
    // Every in-flight status must also be one a user cannot retry over.
    for status in [
        VerificationStatus::NotStarted,
        VerificationStatus::Pending,
        VerificationStatus::NeedsReview,
        VerificationStatus::Approved,
        VerificationStatus::Rejected,
        VerificationStatus::Blocked,
    ] {
        if status.is_in_flight() {
            assert!(!status.is_retryable(), "{status} is in flight but retryable");
        }
    }
}
