// Dojo SQL — safety gating and statement building
// Everything here is pure: no I/O, no shared mutable state.

pub mod builder;
pub mod gate;

pub use builder::{build_insert, build_update, BoundStatement};
pub use gate::{classify, Decision, GateConfig, PolicySet, QueryGate};
