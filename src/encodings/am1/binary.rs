//! # Binary At-Most-1 Encoding
//!
//! Each input literal is assigned a distinct code over `ceil(log2(n))` bit
//! variables and forces the bits of its code when true. Codes are taken in
//! gray code order. When `n` is not a power of two, the first `2^bits - n`
//! literals are each given two adjacent gray codes, which differ in a single
//! bit, so that bit is left unconstrained for them.
//!
//! ## References
//!
//! - Alan M. Frisch and Paul A. Giannaros: _SAT Encodings of the At-Most-k
//!   Constraint_, ModRef 2010.

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
    utils,
};

/// Implementation of the binary at-most-1 encoding with gray codes.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

/// Assigns gray codes to `n_objs` objects over the given bit literals and
/// calls `force` with every object index and the bit literal its code
/// requires.
pub(super) fn gray_assign<F>(n_objs: usize, bits: &[Lit], mut force: F) -> Result<(), Error>
where
    F: FnMut(usize, Lit) -> Result<(), Error>,
{
    let two_pow = 1_usize << bits.len();
    debug_assert!(two_pow >= n_objs);
    let n_double = (two_pow - n_objs) * 2;
    let mut obj = 0;
    let mut code = 0;
    // objects covering two adjacent codes
    while code < n_double {
        let gray = utils::gray_code(code);
        let next = utils::gray_code(code + 1);
        for (j, &bit) in bits.iter().enumerate() {
            if (gray >> j) & 1 == (next >> j) & 1 {
                force(obj, if (gray >> j) & 1 == 1 { bit } else { !bit })?;
            }
        }
        code += 2;
        obj += 1;
    }
    // objects covering a single code
    while code < two_pow {
        let gray = utils::gray_code(code);
        for (j, &bit) in bits.iter().enumerate() {
            force(obj, if (gray >> j) & 1 == 1 { bit } else { !bit })?;
        }
        code += 1;
        obj += 1;
    }
    debug_assert_eq!(obj, n_objs);
    Ok(())
}

impl Encode for Binary {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    #[tracing::instrument(level = "debug", name = "binary_am1", skip_all, fields(n_lits = self.in_lits.len()))]
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
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let bits: Vec<_> = (0..utils::n_code_bits(self.in_lits.len()))
            .map(|_| var_manager.new_lit())
            .collect();
        let in_lits = &self.in_lits;
        gray_assign(in_lits.len(), &bits, |idx, bit| {
            collector.add_clause(atomics::lit_impl_lit(in_lits[idx], bit))?;
            Ok(())
        })?;

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(())
    }
}

impl_inputs!(Binary);

impl EncodeStats for Binary {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
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
        let mut enc: super::Binary = [lit![0], lit![1], lit![2], lit![3]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 6);
        assert_eq!(cnf.len(), 8);
    }

    #[test]
    fn five_lits() {
        let mut enc: super::Binary = (0..5).map(|idx| lit![idx]).collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![5]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(enc.n_vars(), 3);
        assert_eq!(vm.n_used(), 8);
        // three literals with two codes, two literals with one code
        assert_eq!(cnf.len(), 3 * 2 + 2 * 3);
        // codes 0 and 1 share the upper two bits
        assert_eq!(cnf[0], clause![!lit![0], !lit![6]]);
        assert_eq!(cnf[1], clause![!lit![0], !lit![7]]);
    }

    #[test]
    fn two_lits() {
        let mut enc: super::Binary = [lit![0], lit![1]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![2]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 3);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf[0], clause![!lit![0], !lit![2]]);
        assert_eq!(cnf[1], clause![!lit![1], lit![2]]);
    }
}
