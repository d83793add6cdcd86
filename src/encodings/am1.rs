//! # CNF Encodings for At-Most-1 Constraints
//!
//! The module contains implementations of CNF encodings for at-most-1
//! constraints. None of the encodings introduces variables or clauses for
//! less than two input literals.
//!
//! | Encoding | Clauses | Variables |
//! | --- | --- | --- |
//! | [`Pairwise`] | `O(n^2)` | 0 |
//! | [`Ladder`] | `O(n)` | `n - 1` |
//! | [`TwoProduct`] | `O(n)` | `O(sqrt(n))` |
//! | [`Binary`] | `O(n log n)` | `ceil(log2(n))` |
//! | [`Commander`] | `O(n)` | `O(n / group size)` |
//! | [`Nested`] | `O(n)` | `O(n / group size)` |
//! | [`Bimander`] | `O(n^2 / g + n log g)` | `ceil(log2(g))` |
//!
//! ## Example Usage
//!
//! ```
//! use satenc::{
//!     encodings::am1::{self, Encode},
//!     instances::{BasicVarManager, Cnf, ManageVars},
//!     lit, var,
//! };
//!
//! let mut var_manager = BasicVarManager::default();
//! var_manager.increase_next_free(var![3]);
//!
//! let mut encoder = am1::new_default_am1();
//! encoder.extend(vec![lit![0], lit![1], lit![2]]);
//! let mut encoding = Cnf::new();
//! encoder.encode(&mut encoding, &mut var_manager).unwrap();
//! ```

use super::{CollectClauses, EncodeStats, Error, IterInputs};
use crate::{instances::ManageVars, types::Lit};

/// Implements the input handling traits shared by all at-most-1 encodings for
/// a type with an `in_lits: Vec<Lit>` field and a [`Default`] implementation
macro_rules! impl_inputs {
    ($enc:ty) => {
        impl $crate::encodings::IterInputs for $enc {
            type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, $crate::types::Lit>>;

            fn iter(&self) -> Self::Iter<'_> {
                self.in_lits.iter().copied()
            }
        }

        impl From<Vec<$crate::types::Lit>> for $enc {
            fn from(lits: Vec<$crate::types::Lit>) -> Self {
                Self {
                    in_lits: lits,
                    ..Default::default()
                }
            }
        }

        impl FromIterator<$crate::types::Lit> for $enc {
            fn from_iter<T: IntoIterator<Item = $crate::types::Lit>>(iter: T) -> Self {
                Self::from(Vec::from_iter(iter))
            }
        }

        impl Extend<$crate::types::Lit> for $enc {
            fn extend<T: IntoIterator<Item = $crate::types::Lit>>(&mut self, iter: T) {
                self.in_lits.extend(iter);
            }
        }
    };
}

mod pairwise;
pub use pairwise::Pairwise;

mod ladder;
pub use ladder::Ladder;

mod twoproduct;
pub use twoproduct::TwoProduct;

mod binary;
pub use binary::Binary;

mod commander;
pub use commander::Commander;

mod nested;
pub use nested::Nested;

mod bimander;
pub use bimander::Bimander;

/// Trait for all at-most-1 encodings
pub trait Encode: EncodeStats + IterInputs + Extend<Lit> {
    /// Gets the number of literals in the encoding
    fn n_lits(&self) -> usize;

    /// Encodes and enforces the at-most-1 constraint
    ///
    /// # Errors
    ///
    /// - [`Error::GroupSizeTooSmall`] if the configuration of a grouping
    ///   encoding would not terminate
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    fn encode<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses;
}

/// The default at-most-1 encoding. For now this is a [`Pairwise`] encoding.
pub type DefAm1 = Pairwise;

/// Constructs a default at-most-1 encoding.
#[must_use]
pub fn new_default_am1() -> impl Encode {
    DefAm1::default()
}

/// Selection of an at-most-1 encoding with its parameters, for choosing the
/// encoding at runtime
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Am1Encoder {
    /// The [`Pairwise`] encoding
    Pairwise,
    /// The [`Ladder`] encoding
    Ladder,
    /// The [`TwoProduct`] encoding with a given recursion bound
    TwoProduct {
        /// Selector groups up to this size are encoded pairwise
        recursive_bound: usize,
    },
    /// The [`Binary`] encoding
    Binary,
    /// The [`Commander`] encoding with a given group size
    Commander {
        /// The number of literals per group
        group_size: usize,
    },
    /// The [`Nested`] encoding with a given group size
    Nested {
        /// The largest size encoded pairwise
        group_size: usize,
    },
    /// The [`Bimander`] encoding with a given number of groups. If `None`,
    /// `ceil(sqrt(n))` groups are used.
    Bimander {
        /// The number of groups
        n_groups: Option<usize>,
    },
    /// [`Pairwise`] for up to [`BEST_PAIRWISE_LIMIT`] literals, [`TwoProduct`]
    /// above
    #[default]
    Best,
}

/// Largest number of literals [`Am1Encoder::Best`] encodes pairwise
pub const BEST_PAIRWISE_LIMIT: usize = 10;

impl Am1Encoder {
    /// Encodes an at-most-1 constraint over `lits` with the selected encoding.
    /// Returns the number of clauses and variables of the encoding.
    ///
    /// # Errors
    ///
    /// - [`Error::GroupSizeTooSmall`] if the configured group size is too small
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    pub fn encode<Col>(
        self,
        lits: Vec<Lit>,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(usize, u32), Error>
    where
        Col: CollectClauses,
    {
        fn run<Enc, Col>(
            mut enc: Enc,
            collector: &mut Col,
            var_manager: &mut dyn ManageVars,
        ) -> Result<(usize, u32), Error>
        where
            Enc: Encode,
            Col: CollectClauses,
        {
            enc.encode(collector, var_manager)?;
            Ok((enc.n_clauses(), enc.n_vars()))
        }

        match self {
            Am1Encoder::Pairwise => run(Pairwise::from(lits), collector, var_manager),
            Am1Encoder::Ladder => run(Ladder::from(lits), collector, var_manager),
            Am1Encoder::TwoProduct { recursive_bound } => run(
                TwoProduct::from(lits).with_recursive_bound(recursive_bound),
                collector,
                var_manager,
            ),
            Am1Encoder::Binary => run(Binary::from(lits), collector, var_manager),
            Am1Encoder::Commander { group_size } => run(
                Commander::from(lits).with_group_size(group_size),
                collector,
                var_manager,
            ),
            Am1Encoder::Nested { group_size } => run(
                Nested::from(lits).with_group_size(group_size),
                collector,
                var_manager,
            ),
            Am1Encoder::Bimander { n_groups } => {
                let enc = Bimander::from(lits);
                let enc = match n_groups {
                    Some(n_groups) => enc.with_n_groups(n_groups),
                    None => enc,
                };
                run(enc, collector, var_manager)
            }
            Am1Encoder::Best => {
                if lits.len() <= BEST_PAIRWISE_LIMIT {
                    run(Pairwise::from(lits), collector, var_manager)
                } else {
                    run(TwoProduct::from(lits), collector, var_manager)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Am1Encoder;
    use crate::{
        encodings::Error,
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    #[test]
    fn best_small_is_pairwise() {
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        let (n_cls, n_vars) = Am1Encoder::Best
            .encode(
                vec![lit![0], lit![1], lit![2], lit![3]],
                &mut cnf,
                &mut vm,
            )
            .unwrap();
        assert_eq!(n_cls, 6);
        assert_eq!(n_vars, 0);
        assert_eq!(cnf.len(), 6);
        assert_eq!(vm.n_used(), 4);
    }

    #[test]
    fn invalid_group_size() {
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        let res = Am1Encoder::Commander { group_size: 1 }.encode(
            vec![lit![0], lit![1], lit![2], lit![3]],
            &mut cnf,
            &mut vm,
        );
        assert_eq!(res, Err(Error::GroupSizeTooSmall(1, 2)));
        assert!(cnf.is_empty());
    }
}
