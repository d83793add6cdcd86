//! # CNF Encodings for Cardinality Constraints
//!
//! The module contains implementations of CNF encodings for cardinality
//! constraints of the form `sum of lits <= ub`, `sum of lits >= lb` and
//! `sum of lits = b`. It defines traits for (non-)incremental cardinality
//! constraints and encodings implementing these traits.
//!
//! - [`Totalizer`]: adder tree with incremental bound changes and joining
//! - [`ModularTotalizer`]: adder tree counting in quotient and remainder
//!   of a modulus
//! - [`CardinalityNetwork`]: based on the sorting and merging networks in
//!   [`sorting`]
//!
//! Stateful encodings are either built in [`Mode::Static`], where the bound is
//! asserted through hard clauses, or in [`Mode::Incremental`], where the bound
//! is enforced through the assumptions returned by the `enforce_x` methods.
//!
//! ## Example Usage
//!
//! ```
//! use satenc::{
//!     encodings::{card::{BoundUpper, Totalizer}, Mode},
//!     instances::{BasicVarManager, Cnf, ManageVars},
//!     lit, var,
//! };
//!
//! let mut var_manager = BasicVarManager::default();
//! var_manager.increase_next_free(var![4]);
//!
//! let mut enc = Totalizer::from(vec![lit![0], lit![1], lit![2], lit![3]]).with_mode(Mode::Incremental);
//! let mut encoding = Cnf::new();
//! enc.encode_ub(2, &mut encoding, &mut var_manager).unwrap();
//! let assumps = enc.enforce_ub(2).unwrap();
//! assert_eq!(assumps.len(), 1);
//! ```
//!
//! When using cardinality and pseudo-boolean encodings at the same time, it is
//! recommended to import only the modules or rename the traits, e.g., `use
//! card::Encode as EncodeCard`.

use super::{CollectClauses, Error};
use crate::{instances::ManageVars, types::Lit};

pub mod sorting;
pub use sorting::CardinalityNetwork;

pub mod totalizer;
pub use totalizer::Totalizer;

pub mod modtotalizer;
pub use modtotalizer::ModularTotalizer;

/// Trait for all cardinality encodings of form `sum of lits <> rhs`
pub trait Encode {
    /// Gets the number of input literals in the encoding
    fn n_lits(&self) -> usize;
}

/// Trait for cardinality encodings that allow upper bounding of the form `sum
/// of lits <= ub`
pub trait BoundUpper: Encode {
    /// Builds the cardinality encoding for the upper bound `ub`. Static
    /// encodings assert the bound, incremental encodings only build what is
    /// needed for [`BoundUpper::enforce_ub`] with `ub`.
    ///
    /// # Errors
    ///
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

    /// Returns assumptions for enforcing an upper bound (`sum of lits <= ub`).
    /// Bounds already asserted by hard clauses need no assumptions. Make sure
    /// that [`BoundUpper::encode_ub`] has been called adequately, otherwise
    /// [`Error::NotEncoded`] will be returned.
    ///
    /// # Errors
    ///
    /// [`Error::NotEncoded`] if the encoding does not support the bound
    fn enforce_ub(&self, ub: usize) -> Result<Vec<Lit>, Error>;

    /// Encodes an upper bound cardinality constraint to CNF
    ///
    /// # Errors
    ///
    /// If the clause collector runs out of memory
    fn encode_ub_constr<Col>(
        lits: Vec<Lit>,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
        Self: From<Vec<Lit>> + Sized,
    {
        let mut enc = Self::from(lits);
        enc.encode_ub(ub, collector, var_manager)?;
        collector.extend_clauses(
            enc.enforce_ub(ub)?
                .into_iter()
                .map(|unit| crate::clause![unit]),
        )?;
        Ok(())
    }
}

/// Trait for cardinality encodings that allow lower bounding of the form `sum
/// of lits >= lb`
pub trait BoundLower: Encode {
    /// Builds the cardinality encoding for the lower bound `lb`. Static
    /// encodings assert the bound, incremental encodings only build what is
    /// needed for [`BoundLower::enforce_lb`] with `lb`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotIncremental`] if a static encoding would need to relax
    ///   an already asserted bound
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    fn encode_lb<Col>(
        &mut self,
        lb: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses;

    /// Returns assumptions for enforcing a lower bound (`sum of lits >= lb`).
    /// Make sure that [`BoundLower::encode_lb`] has been called adequately,
    /// otherwise [`Error::NotEncoded`] will be returned. If `lb` is higher
    /// than the number of literals in the encoding, [`Error::Unsat`] is
    /// returned.
    ///
    /// # Errors
    ///
    /// [`Error::NotEncoded`] or [`Error::Unsat`]
    fn enforce_lb(&self, lb: usize) -> Result<Vec<Lit>, Error>;

    /// Encodes a lower bound cardinality constraint to CNF
    ///
    /// # Errors
    ///
    /// [`Error::Unsat`] if `lb` is larger than the number of literals, or if
    /// the clause collector runs out of memory
    fn encode_lb_constr<Col>(
        lits: Vec<Lit>,
        lb: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
        Self: From<Vec<Lit>> + Sized,
    {
        let mut enc = Self::from(lits);
        if lb > enc.n_lits() {
            return Err(Error::Unsat);
        }
        enc.encode_lb(lb, collector, var_manager)?;
        collector.extend_clauses(
            enc.enforce_lb(lb)?
                .into_iter()
                .map(|unit| crate::clause![unit]),
        )?;
        Ok(())
    }
}

/// Trait for cardinality encodings that allow upper and lower bounding
pub trait BoundBoth: BoundUpper + BoundLower {
    /// Builds the cardinality encoding for `sum of lits = b`.
    ///
    /// # Errors
    ///
    /// See [`BoundUpper::encode_ub`] and [`BoundLower::encode_lb`]
    fn encode_both<Col>(
        &mut self,
        b: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.encode_ub(b, collector, var_manager)?;
        self.encode_lb(b, collector, var_manager)
    }

    /// Returns assumptions for enforcing an equality (`sum of lits = b`).
    ///
    /// # Errors
    ///
    /// See [`BoundUpper::enforce_ub`] and [`BoundLower::enforce_lb`]
    fn enforce_eq(&self, b: usize) -> Result<Vec<Lit>, Error> {
        let mut assumps = self.enforce_ub(b)?;
        assumps.extend(self.enforce_lb(b)?);
        Ok(assumps)
    }
}

/// Default implementation of [`BoundBoth`] for every encoding that does upper
/// and lower bounding
impl<CE> BoundBoth for CE where CE: BoundUpper + BoundLower {}

/// Trait for cardinality encodings that can change their upper bound after
/// the initial encoding, emitting only the clauses that are new for the
/// changed bound
pub trait BoundUpperIncremental: BoundUpper {
    /// Changes the upper bound of the encoding to `ub`. Static encodings can
    /// only tighten their bound, incremental encodings can also relax it.
    ///
    /// # Errors
    ///
    /// - [`Error::NotEncoded`] if the encoding was not built before
    /// - [`Error::NotIncremental`] if a static encoding would need to relax
    ///   its bound
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

/// The default upper bound encoding. For now this is a [`Totalizer`].
pub type DefUpperBounding = Totalizer;
/// The default lower bound encoding. For now this is a [`Totalizer`].
pub type DefLowerBounding = Totalizer;
/// The default encoding for both bounds. For now this is a [`Totalizer`].
pub type DefBothBounding = Totalizer;
/// The default incremental upper bound encoding. For now this is a [`Totalizer`].
pub type DefIncUpperBounding = Totalizer;

/// Constructs a default upper bounding cardinality encoding.
#[must_use]
pub fn new_default_ub() -> impl BoundUpper {
    DefUpperBounding::default()
}

/// Constructs a default lower bounding cardinality encoding.
#[must_use]
pub fn new_default_lb() -> impl BoundLower {
    DefLowerBounding::default()
}

/// Constructs a default double bounding cardinality encoding.
#[must_use]
pub fn new_default_both() -> impl BoundBoth {
    DefBothBounding::default()
}

/// Constructs a default incremental upper bounding cardinality encoding.
#[must_use]
pub fn new_default_inc_ub() -> impl BoundUpperIncremental {
    DefIncUpperBounding::default().with_mode(super::Mode::Incremental)
}
