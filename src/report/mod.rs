//! Report rendering and CSV persistence.

pub mod generator;

pub use generator::*;
