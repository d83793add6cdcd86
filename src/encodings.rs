//! # Encodings for Common Constraint Types to CNF
//!
//! CNF encodings for at-most-one, cardinality and pseudo-boolean constraints.
//! All encodings emit their clauses into a [`CollectClauses`] implementation
//! and draw fresh variables from a [`ManageVars`](crate::instances::ManageVars)
//! implementation.

use thiserror::Error;

use crate::types::{Clause, Lit};

pub mod am1;
pub mod atomics;
pub mod card;
pub mod pb;

/// Trait for collecting clauses. Mainly used when generating encodings and implemented by
/// [`crate::instances::Cnf`] or by the clause database of a solver.
pub trait CollectClauses {
    /// Gets the number of clauses in the collection
    fn n_clauses(&self) -> usize;

    /// Extends the clause collector with an iterator of clauses
    ///
    /// # Errors
    ///
    /// If the collector runs out of memory, return an [`crate::OutOfMemory`] error.
    fn extend_clauses<T>(&mut self, cl_iter: T) -> Result<(), crate::OutOfMemory>
    where
        T: IntoIterator<Item = Clause>;

    /// Adds one clause to the collector
    ///
    /// # Errors
    ///
    /// If the collector runs out of memory, return an [`crate::OutOfMemory`] error.
    fn add_clause(&mut self, cl: Clause) -> Result<(), crate::OutOfMemory> {
        self.extend_clauses([cl])
    }
}

/// Errors from encodings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Encode was not called before using the encoding
    #[error("not encoded to enforce bound")]
    NotEncoded,
    /// The requested encoding is unsatisfiable
    #[error("encoding is unsat")]
    Unsat,
    /// The group size of a grouping at-most-one encoding is too small for the
    /// encoding to terminate. Contains the requested and the minimum size.
    #[error("group size {0} is too small (minimum {1})")]
    GroupSizeTooSmall(usize, usize),
    /// The right hand side is too large for the arithmetic of the encoding
    #[error("right hand side {0} is too large")]
    RhsTooLarge(usize),
    /// A weight of a pseudo-boolean encoding is zero
    #[error("weights of pseudo-boolean encodings must be strictly positive")]
    ZeroWeight,
    /// The operation requires an incremental encoding, but the encoding was
    /// built without incremental support
    #[error("the encoding was not built incrementally")]
    NotIncremental,
    /// The clause collector ran out of memory
    #[error(transparent)]
    OutOfMemory(#[from] crate::OutOfMemory),
}

/// Trait for encodings that track statistics.
pub trait EncodeStats {
    /// Gets the number of clauses in the encoding
    fn n_clauses(&self) -> usize;

    /// Gets the number of variables in the encoding
    fn n_vars(&self) -> u32;
}

/// Trait for encodings that allow iterating over their input literals
pub trait IterInputs {
    /// The iterator type
    type Iter<'a>: Iterator<Item = Lit>
    where
        Self: 'a;

    /// Gets an iterator over copies of the input literals
    fn iter(&self) -> Self::Iter<'_>;
}

/// Trait for encodings that allow iterating over their weighted input literals
pub trait IterWeightedInputs {
    /// The iterator type
    type Iter<'a>: Iterator<Item = (Lit, usize)>
    where
        Self: 'a;

    /// Gets an iterator over copies of the weighted input literals
    fn iter(&self) -> Self::Iter<'_>;
}

/// How encodings with internal state enforce their bound
///
/// [`Mode::Static`] encodings assert the bound through hard clauses, which is
/// the smallest encoding when the bound never changes.
/// [`Mode::Incremental`] encodings keep their internal structure so that the
/// bound can later be changed, and enforce the current bound through
/// assumptions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Encode for a single bound
    #[default]
    Static,
    /// Encode for changing bounds
    Incremental,
}
