// HTTP API controllers.

pub mod controller;
pub mod healthz;


// Re-export controller types for convenience
pub use healthz::HealthzController;
