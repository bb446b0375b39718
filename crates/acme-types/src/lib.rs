//! Acme Types - Shared domain types
//!
//! This crate contains domain types used across the Acme crates and services:
//! - Invoices and their two-state status
//! - Customers, users and monthly revenue records
//! - Money helpers for converting decimal input to minor currency units

pub mod customer;
pub mod error;
pub mod invoice;
pub mod money;
pub mod revenue;
pub mod user;

pub use customer::*;
pub use error::*;
pub use invoice::*;
pub use money::*;
pub use revenue::*;
pub use user::*;
