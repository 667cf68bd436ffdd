//! Registration reconciliation for the Splits Network portals.
//!
//! The domain layer owns the reconciler and the ports it depends on; outbound
//! adapters talk to the remote REST API and hold the current-user profile.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::ReconcilerSettings;
pub use domain::{ReconciliationResult, RegistrationReconciler};
