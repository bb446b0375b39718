//! REST API handlers

pub mod health;
pub mod invoices;
pub mod shared;

pub use health::*;
pub use invoices::*;
