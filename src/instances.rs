//! # Variable Managers and Clause Collections
//!
//! Types providing the fresh variables encodings introduce and collecting the
//! clauses they produce.

use crate::{types::Var, var};

mod sat;
pub use sat::Cnf;

/// Trait for variable managers keeping track of used variables. Encodings
/// draw all their auxiliary variables from a variable manager, which
/// guarantees that a variable is never handed out twice.
pub trait ManageVars {
    /// Uses up the next free variable
    fn new_var(&mut self) -> Var;

    /// Uses up the next free variable and returns its positive literal
    fn new_lit(&mut self) -> crate::types::Lit {
        self.new_var().pos_lit()
    }

    /// Gets the used variable with the highest index
    fn max_var(&self) -> Option<Var>;

    /// Increases the next free variable index if the provided variable has a
    /// higher index than the next variable in the manager.
    /// Returns true if the next free index has been increased and false otherwise.
    fn increase_next_free(&mut self, v: Var) -> bool;

    /// Marks variables up to the given one as used. Returns true if the next
    /// free index has been increased and false otherwise.
    fn mark_used(&mut self, v: Var) -> bool {
        self.increase_next_free(v + 1)
    }

    /// Gets the number of used variables. Typically this is just the index of
    /// the next free variable.
    fn n_used(&self) -> u32;

    /// Forget variables `>= min_var`
    fn forget_from(&mut self, min_var: Var);
}

/// Simple counting variable manager
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicVarManager {
    next_var: Var,
}

impl BasicVarManager {
    /// Creates a new variable manager from a next free variable
    #[must_use]
    pub fn from_next_free(next_var: Var) -> BasicVarManager {
        BasicVarManager { next_var }
    }
}

impl ManageVars for BasicVarManager {
    fn new_var(&mut self) -> Var {
        let v = self.next_var;
        self.next_var += 1;
        v
    }

    fn max_var(&self) -> Option<Var> {
        if self.next_var == var![0] {
            None
        } else {
            Some(self.next_var - 1)
        }
    }

    fn increase_next_free(&mut self, v: Var) -> bool {
        if v > self.next_var {
            self.next_var = v;
            return true;
        };
        false
    }

    fn n_used(&self) -> u32 {
        self.next_var.idx32()
    }

    fn forget_from(&mut self, min_var: Var) {
        self.next_var = std::cmp::min(self.next_var, min_var);
    }
}

impl Default for BasicVarManager {
    fn default() -> Self {
        Self {
            next_var: Var::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BasicVarManager, ManageVars};
    use crate::var;

    #[test]
    fn var_manager_sequence() {
        let mut man = BasicVarManager::default();
        assert_eq!(man.max_var(), None);
        assert_eq!(man.new_var(), var![0]);
        assert_eq!(man.new_var(), var![1]);
        assert_eq!(man.max_var(), Some(var![1]));
        assert_eq!(man.n_used(), 2);
    }

    #[test]
    fn var_manager_increase() {
        let mut man = BasicVarManager::from_next_free(var![3]);
        assert!(!man.increase_next_free(var![2]));
        assert!(man.increase_next_free(var![5]));
        assert_eq!(man.new_lit(), crate::lit![5]);
        assert!(man.mark_used(var![9]));
        assert_eq!(man.n_used(), 10);
        man.forget_from(var![7]);
        assert_eq!(man.n_used(), 7);
    }
}
