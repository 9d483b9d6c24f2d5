//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: an in-process store implementing the same repository ports
//! - **images**: filesystem cleanup of orphaned menu images
//!
//! Adapters translate between domain types and their infrastructure
//! representation and hold no business rules.

pub mod images;
pub mod memory;
pub mod persistence;
