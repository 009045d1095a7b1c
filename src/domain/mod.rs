// Domain layer: models and ports (interfaces). Nothing here depends on the core or config layers.

pub mod model;
pub mod ports;
