// Domain layer: policy models, the warnings accumulator and the ports the
// resolver talks through.

pub mod model;
pub mod ports;
pub mod warnings;
