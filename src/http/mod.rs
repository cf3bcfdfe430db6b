// HTTP module: inbound server and outbound probe client.

pub mod client;
pub mod server;

// Re-export middleware interface from the dedicated middleware module
pub use crate::middleware::middleware::Middleware;

// Re-export server types
pub use server::HttpServer;

// Common controller interface
pub use crate::controller::controller::Controller;
