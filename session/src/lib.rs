//! Session lifecycle and submission orchestration.
//!
//! Control flow: callers resolve what a user may attempt (via
//! `veriflow-resolver`), then ask the [`SessionLifecycleManager`] for a
//! session bound to that tier, then drive the tier's form through the
//! [`VerificationSubmissionCoordinator`]. The submission outcome feeds
//! back into the history snapshot the resolver consumes.
//!
//! The verification *decision* itself lives behind the [`KycBackend`]
//! trait; this crate is a thin orchestrator over three remote calls plus
//! local durable persistence of one session reference per user.

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod logging;
pub mod manager;
pub mod payload;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{HttpKycBackend, KycBackend, RemoteSession, RemoteSubmissionOutcome};
pub use config::ClientConfig;
pub use coordinator::{SubmissionResult, VerificationSubmissionCoordinator};
pub use logging::{init_logging, LogFormat};
pub use manager::SessionLifecycleManager;
pub use payload::{
    AdvancedData, BasicData, Consent, EnhancedData, StandardData, VerificationPayload,
};
