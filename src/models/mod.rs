//! Data models for the Ireizo API.
//!
//! Records come from the docstore, DDR objects from the DDR API; both are
//! reshaped here into what API clients see.

mod ddr_object;
mod definitions;
mod record;

pub use ddr_object::*;
pub use definitions::*;
pub use record::*;
