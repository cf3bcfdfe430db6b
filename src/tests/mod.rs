//! End-to-end tests for the health aggregator.
//!
//! Each test starts real probe targets and a real server on ephemeral
//! ports, then talks to it over HTTP.
