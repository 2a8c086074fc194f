//! Domain types shared across the Bakehouse storefront.
//!
//! This crate contains only pure types and functions with no framework
//! dependencies, so it stays usable from any layer of a service.

pub mod pagination;
pub mod rating;
pub mod role;
pub mod validate;
