//! Shared test utilities: a clause collector backed by BatSat and exhaustive
//! checking of encodings over all assignments of their input literals

#![allow(dead_code)]

use batsat::{lbool, SolverInterface};
use satenc::{
    encodings::CollectClauses,
    types::{Clause, Lit},
};

/// Collects clauses directly into a [`batsat::BasicSolver`]
#[derive(Default)]
pub struct Solver {
    internal: batsat::BasicSolver,
    n_clauses: usize,
}

impl Solver {
    fn convert(&mut self, lit: Lit) -> batsat::Lit {
        batsat::Lit::new(self.internal.var_of_int(lit.vidx32() + 1), lit.is_pos())
    }

    /// Solves under assumptions, returns whether the instance is satisfiable
    pub fn solve(&mut self, assumps: &[Lit]) -> bool {
        let assumps: Vec<_> = assumps.iter().map(|&l| self.convert(l)).collect();
        let res = self.internal.solve_limited(&assumps);
        assert!(res != lbool::UNDEF, "solver was interrupted");
        res == lbool::TRUE
    }
}

impl CollectClauses for Solver {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn extend_clauses<T>(&mut self, cl_iter: T) -> Result<(), satenc::OutOfMemory>
    where
        T: IntoIterator<Item = Clause>,
    {
        for cl in cl_iter {
            let mut cl: Vec<_> = cl.iter().map(|&l| self.convert(l)).collect();
            self.internal.add_clause_reuse(&mut cl);
            self.n_clauses += 1;
        }
        Ok(())
    }
}

/// The assumptions fixing `lits` to the bits of `mask`, bit `i` set meaning
/// `lits[i]` is true
pub fn assignment(lits: &[Lit], mask: usize) -> Vec<Lit> {
    lits.iter()
        .enumerate()
        .map(|(idx, &l)| if mask & (1 << idx) != 0 { l } else { !l })
        .collect()
}

/// Number of true literals in an assignment mask
pub fn count(mask: usize) -> usize {
    mask.count_ones() as usize
}

/// Weighted sum of the true literals in an assignment mask
pub fn weighted_sum(weights: &[usize], mask: usize) -> usize {
    weights
        .iter()
        .enumerate()
        .filter(|&(idx, _)| mask & (1 << idx) != 0)
        .map(|(_, &w)| w)
        .sum()
}

/// Checks that the solver is satisfiable under every assignment of `lits`
/// (together with `assumps`) exactly if `expected` holds for the assignment
pub fn check_all<F>(solver: &mut Solver, lits: &[Lit], assumps: &[Lit], expected: F)
where
    F: Fn(usize) -> bool,
{
    for mask in 0..1_usize << lits.len() {
        let mut all = assignment(lits, mask);
        all.extend_from_slice(assumps);
        assert_eq!(
            solver.solve(&all),
            expected(mask),
            "assignment {mask:0width$b} with assumptions {assumps:?}",
            width = lits.len()
        );
    }
}
