// Adapters layer: concrete notification sinks for the library core.

pub mod notifier;
