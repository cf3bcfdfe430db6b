#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod app;
pub mod config;
pub mod controller;
pub mod evaluator;
pub mod http;
pub mod middleware;
pub mod model;
pub mod shutdown;
