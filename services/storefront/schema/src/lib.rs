//! sea-orm entities for the storefront database.

pub mod accounts;
pub mod order_items;
pub mod order_sequences;
pub mod orders;
pub mod products;
pub mod reviews;
