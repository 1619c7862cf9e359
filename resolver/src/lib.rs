//! Pure level-status resolution.
//!
//! Given a user's full verification history (possibly empty or not yet
//! loaded), this crate derives a per-tier status the UI and permission
//! checks can act on, plus the user's current tier. Resolution is a pure
//! function: no network, no storage, deterministic for the same input.
//!
//! The history-aware skip-ahead policy is implemented: a tier is
//! attemptable when it is the sequential next step above the highest
//! approved tier, when the tier directly below it is still under review,
//! or when it has itself already been cleared (re-verification).

pub mod resolution;
pub mod status_map;

pub use resolution::{current_level, resolve, LevelResolution};
pub use status_map::{resolve_all, LevelStatusMap};
