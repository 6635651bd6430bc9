//! Dataset input: CSV loading and numeric coercion.
//!
//! ```text
//!   results.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Table (all text)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize │  measured columns → f64
//!   └───────────┘
//! ```

pub mod loader;
pub mod normalize;

pub use loader::load_csv;
pub use normalize::coerce_to_float;
