// Domain layer: wire values and ports. No HTTP here.

pub mod model;
pub mod ports;
