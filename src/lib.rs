//! Kraken Sim - attack-order optimizer for the Mechanical Kraken encounter
//!
//! Monte Carlo battle simulation over every permutation of the boss's parts,
//! ranked by win rate against an ammo budget.

pub mod attacker;
pub mod config;
pub mod simulation;
pub mod stats;
pub mod strategy;

#[cfg(feature = "python")]
mod python;

pub use attacker::*;
pub use config::*;
pub use simulation::*;
pub use stats::*;
pub use strategy::*;
