//! # Bimander At-Most-1 Encoding
//!
//! ## References
//!
//! - Van-Hau Nguyen and Son Thay Mai: _A New Method to Encode the At-Most-One
//!   Constraint into SAT_, SOICT 2015.

use super::{binary, Encode};
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error},
    instances::ManageVars,
    types::Lit,
    utils,
};

/// Implementation of the bimander at-most-1 encoding.
///
/// The input literals are split into groups of nearly equal size that are
/// encoded pairwise. Each group is given a gray code over `ceil(log2(groups))`
/// bit variables, the same way as the [`super::Binary`] encoding does for
/// literals, and every literal of a group forces the bits of its group's code.
///
/// # References
///
/// - Van-Hau Nguyen and Son Thay Mai: _A New Method to Encode the At-Most-One
///   Constraint into SAT_, SOICT 2015.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bimander {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of groups, `ceil(sqrt(n))` if not set
    n_groups: Option<usize>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl Bimander {
    /// Sets the number of groups. Must be at least 2, smaller numbers are
    /// rejected when encoding. More groups than literals are reduced to one
    /// literal per group.
    #[must_use]
    pub fn with_n_groups(mut self, n_groups: usize) -> Self {
        self.n_groups = Some(n_groups);
        self
    }

    /// Splits the input literals into `n_groups` groups of nearly equal size
    fn groups(&self, n_groups: usize) -> Vec<&[Lit]> {
        let n = self.in_lits.len();
        let mut groups = Vec::with_capacity(n_groups);
        let mut start = 0;
        let mut end = utils::ceil_div(n, n_groups);
        while start < n {
            groups.push(&self.in_lits[start..end]);
            start = end;
            if groups.len() < n_groups {
                end += utils::ceil_div(n - start, n_groups - groups.len());
            }
        }
        groups
    }
}

impl Encode for Bimander {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }

    #[tracing::instrument(level = "debug", name = "bimander_am1", skip_all, fields(n_lits = self.in_lits.len()))]
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
        let n_groups = self.n_groups.unwrap_or_else(|| utils::ceil_sqrt(n));
        if n_groups < 2 {
            return Err(Error::GroupSizeTooSmall(n_groups, 2));
        }
        let n_groups = std::cmp::min(n_groups, n);
        let prev_clauses = collector.n_clauses();
        let prev_vars = var_manager.n_used();

        let groups = self.groups(n_groups);
        debug_assert_eq!(groups.len(), n_groups);
        for group in &groups {
            collector.extend_clauses(atomics::pairwise_exclusion(group))?;
        }
        let bits: Vec<_> = (0..utils::n_code_bits(n_groups))
            .map(|_| var_manager.new_lit())
            .collect();
        binary::gray_assign(n_groups, &bits, |gidx, bit| {
            collector.extend_clauses(groups[gidx].iter().map(|&lit| atomics::lit_impl_lit(lit, bit)))?;
            Ok(())
        })?;

        self.n_clauses += collector.n_clauses() - prev_clauses;
        self.n_vars += var_manager.n_used() - prev_vars;
        Ok(())
    }
}

impl_inputs!(Bimander);

impl EncodeStats for Bimander {
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
        let mut enc: super::Bimander = (0..6).map(|idx| lit![idx]).collect();
        enc = enc.with_n_groups(3);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![6]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 8);
        // three pairs, first group sharing one bit, the others fixing both
        assert_eq!(cnf.len(), 3 + 2 + 2 * 4);
        assert_eq!(enc.n_vars(), 2);
    }

    #[test]
    fn grouping() {
        let enc: super::Bimander = (0..5).map(|idx| lit![idx]).collect();
        let groups = enc.groups(3);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], &[lit![0], lit![1]]);
        assert_eq!(groups[1], &[lit![2], lit![3]]);
        assert_eq!(groups[2], &[lit![4]]);
        let enc: super::Bimander = (0..10).map(|idx| lit![idx]).collect();
        let sizes: Vec<_> = enc.groups(4).into_iter().map(<[_]>::len).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
    }

    #[test]
    fn default_groups() {
        let mut enc: super::Bimander = (0..9).map(|idx| lit![idx]).collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![9]);
        enc.encode(&mut cnf, &mut vm).unwrap();
        assert_eq!(enc.n_vars(), 2);
        assert_eq!(vm.n_used(), 11);
    }

    #[test]
    fn invalid_groups() {
        let mut enc: super::Bimander = (0..5).map(|idx| lit![idx]).collect();
        enc = enc.with_n_groups(1);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![5]);
        assert_eq!(
            enc.encode(&mut cnf, &mut vm),
            Err(Error::GroupSizeTooSmall(1, 2))
        );
    }
}
