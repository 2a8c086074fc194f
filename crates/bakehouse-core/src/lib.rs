//! Cross-cutting HTTP service helpers shared by Bakehouse services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
