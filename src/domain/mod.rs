// Domain layer: key schema, entity models and ports. Only std/serde beyond the crate's own error type.

pub mod model;
pub mod ports;
pub mod schema;
