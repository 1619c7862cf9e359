//! Abstract session persistence for the Veriflow KYC core.
//!
//! The lifecycle manager persists one session reference per user so an
//! in-progress verification survives a reload or restart. Every backend
//! (in-memory for tests, a JSON file for durable client state) implements
//! the [`SessionStore`] trait; the rest of the workspace depends only on
//! the trait.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use veriflow_types::{UserId, VerificationSession};

/// Durable key-value persistence of the per-user session reference.
///
/// Key: user id. Value: the serialized session. At most one session is
/// stored per user; `put_session` replaces any previous one.
pub trait SessionStore: Send + Sync {
    /// Persist (or replace) the session reference for its user.
    fn put_session(&self, session: &VerificationSession) -> Result<(), StoreError>;

    /// Look up the persisted session for a user, if any.
    fn get_session(&self, user: &UserId) -> Result<Option<VerificationSession>, StoreError>;

    /// Remove the persisted session for a user. Removing a missing entry
    /// is not an error.
    fn delete_session(&self, user: &UserId) -> Result<(), StoreError>;
}
