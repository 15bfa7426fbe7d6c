//! Metropolis Monte Carlo move evaluation for particles in a periodic box.
//!
//! The [`Integrator`] computes the pair energy of one particle with the rest of
//! the system, applies the Metropolis acceptance criterion, and retunes the
//! maximum trial displacement from the observed acceptance rate. The pair
//! potential and the minimum-image geometry are supplied by the caller.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod integrator;

pub use collaborators::{MinimumImage, PairPotential};
pub use config::IntegratorConfig;
pub use error::{CollaboratorError, McError};
pub use integrator::{DisplacementUpdate, Integrator, TrialCounters};
