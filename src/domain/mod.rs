// Domain layer: report data model and the ports the job talks through.

pub mod model;
pub mod ports;
