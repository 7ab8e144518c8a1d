// Domain layer: the customer record, the closed option sets and the ports the
// pipeline is written against.

pub mod model;
pub mod ports;
