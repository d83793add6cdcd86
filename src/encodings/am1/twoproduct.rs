//! # 2-Product At-Most-1 Encoding
//!
//! ## References
//!
//! - Jingchao Chen: _A New SAT Encoding of the At-Most-One Constraint_, ModRef 2010.

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
    utils,
};

/// Default for [`TwoProduct::with_recursive_bound`]
pub const DEFAULT_RECURSIVE_BOUND: usize = 20;

/// Implementation of the recursive 2-product at-most-1 encoding.
///
/// The input literals are arranged in a `p x q` grid with `p = ceil(sqrt(n))`
/// and `q = ceil(n / p)`. Every literal implies its row and its column
/// selector, and at-most-1 is enforced on both selector groups. Selector
/// groups of up to the recursive bound literals are encoded pairwise, larger
/// ones are encoded as 2-products again.
///
/// # References
///
/// - Jingchao Chen: _A New SAT Encoding of the At-Most-One Constraint_, ModRef 2010.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoProduct {
    /// Input literals
    in_lits: Vec<Lit>,
    /// Groups up to this size are encoded pairwise
    recursive_bound: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl TwoProduct {
    /// Sets the largest group size that is encoded pairwise. Must be at least
    /// 2, smaller bounds are rejected when encoding.
    #[must_use]
    pub fn with_recursive_bound(mut self, recursive_bound: usize) -> Self {
        self.recursive_bound = recursive_bound;
        self
    }
}

impl Default for TwoProduct {
    fn default() -> Self {
        Self {
            in_lits: Vec::default(),
            recursive_bound: DEFAULT_RECURSIVE_BOUND,
            n_clauses: 0,
            n_vars: 0,
        }
    }
}

impl Encode for TwoProduct {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    #[tracing::instrument(level = "debug", name = "twoproduct_am1", skip_all, fields(n_lits = self.in_lits.len(), bound = self.recursive_bound))]
    fn encode<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        if self.in_lits.len() <= 1 {
            return Ok(());
        }
        if self.recursive_bound < 2 {
            return Err(Error::GroupSizeTooSmall(self.recursive_bound, 2));
        }
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let mut open = vec![self.in_lits.clone()];
        while let Some(lits) = open.pop() {
            if lits.len() <= self.recursive_bound {
                collector.extend_clauses(atomics::pairwise_exclusion(&lits))?;
                continue;
            }
            let p = utils::ceil_sqrt(lits.len());
            let q = utils::ceil_div(lits.len(), p);
            let rows: Vec<_> = (0..p).map(|_| var_manager.new_lit()).collect();
            let cols: Vec<_> = (0..q).map(|_| var_manager.new_lit()).collect();
            tracing::trace!(n_lits = lits.len(), p, q, "2-product grid");
            for (k, &lit) in lits.iter().enumerate() {
                collector.extend_clauses([
                    atomics::lit_impl_lit(lit, rows[k / q]),
                    atomics::lit_impl_lit(lit, cols[k % q]),
                ])?;
            }
            open.push(cols);
            open.push(rows);
        }

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(())
    }
}

impl_inputs!(TwoProduct);

impl EncodeStats for TwoProduct {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}
