//! # Ladder At-Most-1 Encoding
//!
//! Also known as the _sequential_ encoding. A chain of auxiliary variables
//! `s_i` is forced true from the first true input literal onward.
//!
//! ## References
//!
//! - Ian P. Gent and Peter Nightingale: _A new Encoding of AllDifferent into SAT_, ModRef 2004.
//! - Carsten Sinz: _Towards an Optimal CNF Encoding of Boolean Cardinality Constraints_, CP 2005.

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
};

/// Implementation of the ladder at-most-1 encoding.
///
/// # References
///
/// - Ian P. Gent and Peter Nightingale: _A new Encoding of AllDifferent into SAT_, ModRef 2004.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ladder {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl Encode for Ladder {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    #[tracing::instrument(level = "debug", name = "ladder_am1", skip_all, fields(n_lits = self.in_lits.len()))]
    fn encode<Col>(
        &mut self,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n = self.in_lits.len();
        if n <= 1 {
            return Ok(());
        }
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let seq: Vec<_> = (0..n - 1).map(|_| var_manager.new_lit()).collect();
        // first and last literal only touch one end of the ladder
        collector.add_clause(atomics::lit_impl_lit(self.in_lits[0], seq[0]))?;
        for idx in 1..n - 1 {
            let lit = self.in_lits[idx];
            collector.extend_clauses([
                atomics::lit_impl_lit(lit, seq[idx]),
                atomics::lit_impl_lit(seq[idx - 1], seq[idx]),
                atomics::lit_impl_lit(lit, !seq[idx - 1]),
            ])?;
        }
        collector.add_clause(atomics::lit_impl_lit(self.in_lits[n - 1], !seq[n - 2]))?;

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(())
    }
}

impl_inputs!(Ladder);

impl EncodeStats for Ladder {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}
