//! # Commander At-Most-1 Encoding
//!
//! ## References
//!
//! - Will Klieber and Gihwon Kwon: _Efficient CNF Encoding for Selecting 1
//!   from N Objects_, CFV 2007.

use super::Encode;
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::{Clause, Lit},
};

/// Default for [`Commander::with_group_size`]
pub const DEFAULT_GROUP_SIZE: usize = 3;

/// Implementation of the commander at-most-1 encoding.
///
/// The literals are split into groups of a fixed size, each group is encoded
/// pairwise and gets a commander literal that is implied by every literal of
/// the group. The same is repeated on the commander literals until at most
/// group size literals remain, which are again encoded pairwise. From the
/// second level on, a true commander additionally requires one of its group to
/// be true.
///
/// # References
///
/// - Will Klieber and Gihwon Kwon: _Efficient CNF Encoding for Selecting 1
///   from N Objects_, CFV 2007.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commander {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of literals per group
    group_size: usize,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl Commander {
    /// Sets the number of literals per group. Must be at least 2, smaller sizes
    /// are rejected when encoding.
    #[must_use]
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }
}

impl Default for Commander {
    fn default() -> Self {
        Self {
            in_lits: Vec::default(),
            group_size: DEFAULT_GROUP_SIZE,
            n_clauses: 0,
            n_vars: 0,
        }
    }
}

impl Encode for Commander {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    #[tracing::instrument(level = "debug", name = "commander_am1", skip_all, fields(n_lits = self.in_lits.len(), group_size = self.group_size))]
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
        if self.group_size < 2 {
            return Err(Error::GroupSizeTooSmall(self.group_size, 2));
        }
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let mut current = self.in_lits.clone();
        let mut exactly_one = false;
        while current.len() > self.group_size {
            let mut commanders = Vec::with_capacity(current.len() / self.group_size + 1);
            for group in current.chunks(self.group_size) {
                collector.extend_clauses(atomics::pairwise_exclusion(group))?;
                // `none` is true if no literal of the group is
                let none = var_manager.new_lit();
                if exactly_one {
                    let mut cl: Clause = group.iter().copied().collect();
                    cl.add(none);
                    collector.add_clause(cl)?;
                }
                collector.extend_clauses(atomics::clause_impl_lit(group, !none))?;
                commanders.push(!none);
            }
            tracing::trace!(n_groups = commanders.len(), "commander level");
            current = commanders;
            exactly_one = true;
        }
        collector.extend_clauses(atomics::pairwise_exclusion(&current))?;
        if exactly_one && !current.is_empty() {
            collector.add_clause(current.into_iter().collect())?;
        }

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(())
    }
}

impl_inputs!(Commander);

impl EncodeStats for Commander {
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
        let mut enc: super::Commander = [lit![0], lit![1], lit![2], lit![3]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 6);
        // groups {0,1,2} and {3}, then exactly one over both commanders
        assert_eq!(cnf.len(), 3 + 3 + 1 + 1 + 1);
        assert_eq!(enc.n_clauses(), 9);
    }

    #[test]
    fn within_group_size() {
        let mut enc: super::Commander = [lit![0], lit![1], lit![2]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 3);
        assert_eq!(cnf.len(), 3);
    }

    #[test]
    fn invalid_group_size() {
        let mut enc: super::Commander = [lit![0], lit![1], lit![2]].into_iter().collect();
        enc = enc.with_group_size(1);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        assert_eq!(
            enc.encode(&mut cnf, &mut vm),
            Err(Error::GroupSizeTooSmall(1, 2))
        );
    }
}
