// Domain layer: entities, notifications and the ports the library core talks through.

pub mod model;
pub mod notification;
pub mod ports;
