//! Shared primitives and traits for the Eulera assembly workspace.
//!
//! `eulera-core` provides the foundation the other Eulera crates build on:
//!
//! - **Error types** — [`EuleraError`] and [`Result`] for structured error handling
//! - **Traits** — [`Summarizable`] for one-line reports

pub mod error;
pub mod traits;

pub use error::{EuleraError, Result};
pub use traits::*;
