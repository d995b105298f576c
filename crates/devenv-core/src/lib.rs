//! Shared HTTP plumbing for devenv services.

pub mod health;
pub mod middleware;
pub mod tracing;
