//! # satenc - CNF Encodings for Cardinality and Pseudo-Boolean Constraints
//!
//! `satenc` compiles at-most-one, cardinality and pseudo-boolean constraints
//! into equisatisfiable sets of clauses. Auxiliary variables are drawn from a
//! variable manager ([`instances::ManageVars`]) and clauses are emitted into
//! a clause collector ([`encodings::CollectClauses`]), e.g., a [`instances::Cnf`]
//! or the clause database of a solver.
//!
//! Several of the encodings keep their internal state between calls so that
//! they can be used incrementally, e.g., when the bound of a constraint is
//! tightened in a branch-and-bound style MaxSAT search or when two constraints
//! are merged.
//!
//! ## Features
//!
//! | Feature name | Description |
//! | --- | --- |
//! | `internals` | Make some internal data structures and utilities public. This is useful when basing a more complex encoding on the implementation of another encoding. Note that the internal API might change between releases. |
//! | `fxhash` | Use the faster firefox hash function from `rustc-hash`. |
//! | `serde` | Derive `serde::Serialize` and `serde::Deserialize` for types and encodings. |
//!
//! ## Logging
//!
//! Encodings emit [`tracing`] spans and events. Nothing is printed unless the
//! application installs a subscriber.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! Currently, the MSRV is 1.76.0.

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

use std::collections::TryReserveError;

use thiserror::Error;

pub mod encodings;
pub mod instances;
pub mod types;

#[cfg(not(feature = "internals"))]
mod utils;
#[cfg(feature = "internals")]
pub mod utils;

/// Error returned if an operation ran out of memory
///
/// The library is not _fully_ memory safe, i.e., not all allocations are
/// checked, but encodings try to report failed allocations of their clause
/// collector through this error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutOfMemory {
    /// A `try_reserve` call in the clause collector failed
    #[error("try reserve error: {0}")]
    TryReserve(#[from] TryReserveError),
    /// An external clause sink (e.g., a solver) ran out of memory
    #[error("external API operation ran out of memory")]
    ExternalApi,
}
