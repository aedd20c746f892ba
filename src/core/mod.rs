// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod pauli;
pub mod span;
pub mod tableau;

pub use error::{ClbitId, LogicalError, QubitId};
pub use pauli::Pauli;
pub use span::{ClbitSpan, QubitSpan, Span};
pub use tableau::{CodeLabel, StabilizerTableau};

pub mod constants;
