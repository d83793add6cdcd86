//! # Nested At-Most-1 Encoding
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
};

/// Default for [`Nested::with_group_size`]
pub const DEFAULT_GROUP_SIZE: usize = 4;

/// Implementation of the nested at-most-1 encoding.
///
/// Literal lists larger than the group size are split in half. A fresh
/// literal `v` is added positively to the left and negatively to the right
/// half, and both halves are encoded separately. A true literal on the left
/// forces `!v`, which then excludes every literal on the right. Lists of at
/// most group size literals are encoded pairwise.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nested {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The largest list size that is encoded pairwise
    group_size: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl Nested {
    /// Sets the largest list size that is encoded pairwise. Must be at least 3,
    /// since splitting three literals yields a half of three literals again.
    #[must_use]
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }
}

impl Default for Nested {
    fn default() -> Self {
        Self {
            in_lits: Vec::default(),
            group_size: DEFAULT_GROUP_SIZE,
            n_clauses: 0,
            n_vars: 0,
        }
    }
}

impl Encode for Nested {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    #[tracing::instrument(level = "debug", name = "nested_am1", skip_all, fields(n_lits = self.in_lits.len(), group_size = self.group_size))]
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
        if self.group_size < 3 {
            return Err(Error::GroupSizeTooSmall(self.group_size, 3));
        }
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let mut open = vec![self.in_lits.clone()];
        while let Some(mut left) = open.pop() {
            if left.len() <= self.group_size {
                collector.extend_clauses(atomics::pairwise_exclusion(&left))?;
                continue;
            }
            let split = left.len() / 2;
            let mut right = left.split_off(split);
            let v = var_manager.new_lit();
            left.push(v);
            right.push(!v);
            open.push(right);
            open.push(left);
        }

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(())
    }
}

impl_inputs!(Nested);

impl EncodeStats for Nested {
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
        encodings::{am1::Encode, EncodeStats, Error},
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    #[test]
    fn basic() {
        let mut enc: super::Nested = (0..5).map(|idx| lit![idx]).collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![5]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 6);
        // halves {0,1,v} and {2,3,4,!v}
        assert_eq!(cnf.len(), 3 + 6);
        assert_eq!(enc.n_vars(), 1);
    }

    #[test]
    fn small_group_size() {
        let mut enc: super::Nested = (0..8).map(|idx| lit![idx]).collect();
        enc = enc.with_group_size(3);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![8]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        // 8 splits into 5 + 5, each 5 into 3 + 4, each 4 into 3 + 3
        assert_eq!(enc.n_vars(), 1 + 2 * (1 + 1));
        assert_eq!(cnf.len(), 2 * (3 + 3 + 3));
    }

    #[test]
    fn invalid_group_size() {
        let mut enc: super::Nested = (0..5).map(|idx| lit![idx]).collect();
        enc = enc.with_group_size(2);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![5]);
        assert_eq!(
            enc.encode(&mut cnf, &mut vm),
            Err(Error::GroupSizeTooSmall(2, 3))
        );
    }
}
