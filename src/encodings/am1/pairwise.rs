//! # Pairwise At-Most-1 Encoding
//!
//! Also known as the _pure_ or _naive_ encoding. Forbids every pair of input
//! literals from being true together.
//!
//! ## References
//!
//! - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
};

/// Implementation of the pairwise at-most-1 encoding.
///
/// # References
///
/// - Steven D. Prestwich: _CNF Encodings_, in Handbook of Satisfiability 2021.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pairwise {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
}

impl Encode for Pairwise {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    fn encode<Col>(
        &mut self,
        collector: &mut Col,
        _var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let prev_clauses = collector.n_clauses();
        collector.extend_clauses(atomics::pairwise_exclusion(&self.in_lits))?;
        self.n_clauses += collector.n_clauses() - prev_clauses;
        tracing::trace!(n_lits = self.in_lits.len(), n_clauses = self.n_clauses, "pairwise am1");
        Ok(())
    }
}

impl_inputs!(Pairwise);

impl EncodeStats for Pairwise {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        clause,
        encodings::{am1::Encode, EncodeStats},
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    #[test]
    fn basic() {
        let mut enc: super::Pairwise = [lit![0], lit![1], lit![2], lit![3]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 4);
        assert_eq!(cnf.len(), 6);
        assert_eq!(enc.n_clauses(), 6);
        assert_eq!(cnf[0], clause![!lit![0], !lit![1]]);
    }

    #[test]
    fn empty() {
        let mut enc = super::Pairwise::default();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::default();
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert!(cnf.is_empty());
        assert_eq!(vm.n_used(), 0);
    }
}
