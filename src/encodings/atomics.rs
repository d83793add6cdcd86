//! # "Atomic"/"Trivial" Encodings
//!
//! Clause shapes for implications between literals, cubes and clauses. These
//! are the building blocks all other encodings emit their clauses through.

use std::ops::Not;

use crate::{
    clause,
    types::{Clause, Lit},
};

/// Implication of form `a -> b`
#[must_use]
pub fn lit_impl_lit(a: Lit, b: Lit) -> Clause {
    clause![!a, b]
}

/// Implication of form `(a1 & a2 & ... & an) -> b`
#[must_use]
pub fn cube_impl_lit(a: &[Lit], b: Lit) -> Clause {
    let mut cl: Clause = a.iter().copied().map(Not::not).collect();
    cl.add(b);
    cl
}

/// Implication of form `(a1 | a2 | ... | an) -> b`
pub fn clause_impl_lit(a: &[Lit], b: Lit) -> impl Iterator<Item = Clause> + '_ {
    a.iter().map(move |ai| clause![!*ai, b])
}

/// Pairwise exclusion of all literals, i.e., for all `i < j` the clause
/// `!ai | !aj`
pub fn pairwise_exclusion(a: &[Lit]) -> impl Iterator<Item = Clause> + '_ {
    a.iter()
        .enumerate()
        .flat_map(move |(idx, &ai)| a[idx + 1..].iter().map(move |&aj| clause![!ai, !aj]))
}

/// Negative units `!a1`, `!a2`, ..., `!an`
pub fn neg_units(a: &[Lit]) -> impl Iterator<Item = Clause> + '_ {
    a.iter().map(|&ai| clause![!ai])
}
