pub mod case_ledger;
pub mod discord;
pub mod error;
pub mod jail_service;
pub mod notifier;
pub mod permission_gate;
pub mod role_snapshot;
pub mod role_transition;
pub mod traits;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::JailError;
pub use jail_service::{JailOutcome, Jailer, TargetLocks};
pub use types::{JailOptions, JailRequest};
