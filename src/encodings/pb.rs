//! # CNF Encodings for Pseudo-Boolean Constraints
//!
//! The module contains implementations of CNF encodings for pseudo-boolean
//! constraints of the form `weighted sum of lits <= ub` with strictly
//! positive integer weights. It defines traits for (non-)incremental PB
//! constraints and encodings implementing these traits.
//!
//! ## Example Usage
//!
//! ```
//! use satenc::{
//!     encodings::pb::{BoundUpper, SequentialWeightCounter},
//!     instances::{BasicVarManager, Cnf, ManageVars},
//!     lit, var,
//! };
//!
//! let mut var_manager = BasicVarManager::default();
//! var_manager.increase_next_free(var![4]);
//!
//! let mut enc: SequentialWeightCounter =
//!     [(lit![0], 4), (lit![1], 2), (lit![2], 2), (lit![3], 6)].into_iter().collect();
//! let mut encoding = Cnf::new();
//! enc.encode_ub(6, &mut encoding, &mut var_manager).unwrap();
//! assert_eq!(enc.enforce_ub(6), Ok(vec![]));
//! ```
//!
//! When using cardinality and pseudo-boolean encodings at the same time, it is
//! recommended to import only the modules or rename the traits, e.g., `use
//! pb::Encode as EncodePB`.

use super::{CollectClauses, Error};
use crate::{instances::ManageVars, types::Lit};

pub mod swc;
pub use swc::SequentialWeightCounter;

/// Trait for all pseudo-boolean encodings of form `weighted sum of lits <> rhs`
pub trait Encode {
    /// Get the sum of weights in the encoding
    fn weight_sum(&self) -> usize;
}

/// Trait for pseudo-boolean encodings that allow upper bounding of the form
/// `weighted sum of lits <= ub`
pub trait BoundUpper: Encode {
    /// Builds the pseudo-boolean encoding for the upper bound `ub`.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroWeight`] if an input literal has weight zero
    /// - [`Error::RhsTooLarge`] if `ub` is `usize::MAX`
    /// - [`Error::NotIncremental`] if a static encoding would need to relax
    ///   an already asserted bound
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    fn encode_ub<Col>(
        &mut self,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses;

    /// Returns assumptions for enforcing an upper bound (`weighted sum of lits
    /// <= ub`). Make sure that [`BoundUpper::encode_ub`] has been called
    /// adequately and nothing has been called afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::NotEncoded`] if [`BoundUpper::encode_ub`] has not been called
    /// adequately before.
    fn enforce_ub(&self, ub: usize) -> Result<Vec<Lit>, Error>;

    /// Encodes an upper bound pseudo-boolean constraint to CNF
    ///
    /// # Errors
    ///
    /// See [`BoundUpper::encode_ub`]
    fn encode_ub_constr<Col>(
        lits: Vec<(Lit, usize)>,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
        Self: FromIterator<(Lit, usize)> + Sized,
    {
        let mut enc = Self::from_iter(lits);
        enc.encode_ub(ub, collector, var_manager)?;
        collector.extend_clauses(
            enc.enforce_ub(ub)?
                .into_iter()
                .map(|unit| crate::clause![unit]),
        )?;
        Ok(())
    }
}

/// Trait for pseudo-boolean encodings that can change their upper bound after
/// the initial encoding
pub trait BoundUpperIncremental: BoundUpper {
    /// Changes the upper bound of the encoding to `ub`, emitting only clauses
    /// that are new for the changed bound.
    ///
    /// # Errors
    ///
    /// - [`Error::NotEncoded`] if the encoding was not built before
    /// - [`Error::NotIncremental`] if the encoding was not built for
    ///   changing bounds
    /// - [`Error::RhsTooLarge`] if `ub` is `usize::MAX`
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    fn encode_ub_change<Col>(
        &mut self,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses;
}

/// The default upper bound encoding. For now this is a [`SequentialWeightCounter`].
pub type DefUpperBounding = SequentialWeightCounter;
/// The default incremental upper bound encoding. For now this is a
/// [`SequentialWeightCounter`].
pub type DefIncUpperBounding = SequentialWeightCounter;

/// Constructs a default upper bounding pseudo-boolean encoding.
#[must_use]
pub fn new_default_ub() -> impl BoundUpper {
    DefUpperBounding::default()
}

/// Constructs a default incremental upper bounding pseudo-boolean encoding.
#[must_use]
pub fn new_default_inc_ub() -> impl BoundUpperIncremental {
    DefIncUpperBounding::default().with_mode(super::Mode::Incremental)
}
