// Domain layer: data model and the resolver ports the orchestrator depends on.

pub mod model;
pub mod ports;
