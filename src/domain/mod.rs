// Domain layer: dominoes, hands and the ports the dealer talks through.

pub mod model;
pub mod ports;
