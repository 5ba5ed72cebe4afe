//! Inventory and requirements document I/O adapters.

pub mod csv;
pub mod yaml;
