//! Stateless services orchestrating the rules over the storage boundary.

pub mod enforcement_service;
pub mod simulation_service;
pub mod spend_service;

pub use enforcement_service::{EnforcementService, ResetOutcome, SweepOutcome};
pub use simulation_service::SimulationService;
pub use spend_service::SpendService;
