//! Holdings module - per-user fund positions and cost basis accounting.

pub mod cost_basis;
mod holding_locks;
mod holdings_model;
mod holdings_service;
mod holdings_traits;

#[cfg(test)]
mod cost_basis_tests;

pub use cost_basis::{merge, CostBasis};
pub use holding_locks::{HoldingGuard, HoldingLocks};
pub use holdings_model::{Holding, NewHolding};
pub use holdings_service::HoldingService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
