//! Fundamental types for the Veriflow KYC core.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: verification levels and statuses, history records, sessions,
//! identifiers, timestamps, and the shared error taxonomy.

pub mod error;
pub mod level;
pub mod record;
pub mod session;
pub mod status;
pub mod time;
pub mod user;

pub use error::KycError;
pub use level::VerificationLevel;
pub use record::KycRecord;
pub use session::{SessionId, SessionStatus, VerificationSession};
pub use status::VerificationStatus;
pub use time::Timestamp;
pub use user::UserId;
