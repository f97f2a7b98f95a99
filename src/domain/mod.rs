// Domain layer: chart models and ports. No dependencies beyond serde and async-trait.

pub mod model;
pub mod ports;
