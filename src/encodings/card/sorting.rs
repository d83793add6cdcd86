//! # Sorting and Merging Networks
//!
//! Networks that sort their input literals in descending order, i.e., the
//! `k`-th output is true if at least `k` inputs are true. Only the top `m`
//! outputs are built. Depending on the [`Direction`], the network only
//! propagates from inputs to outputs, from outputs to inputs, or both.
//!
//! For the input to output direction, either a counter based sorter or a
//! direct sorter enumerating all input subsets is used, whichever produces
//! fewer clauses. Otherwise, the inputs are split in half, sorted recursively
//! and combined with an odd-even merger.
//!
//! [`CardinalityNetwork`] uses the networks to encode cardinality constraints.
//!
//! ## References
//!
//! - Roberto Asín, Robert Nieuwenhuis, Albert Oliveras and Enric
//!   Rodríguez-Carbonell: _Cardinality Networks: a theoretical and empirical
//!   study_, Constraints 2011.
//! - Ignasi Abío, Robert Nieuwenhuis, Albert Oliveras and Enric
//!   Rodríguez-Carbonell: _A Parametric Approach for Smaller and Better
//!   Encodings of Cardinality Constraints_, CP 2013.

use std::cmp;

use super::{BoundLower, BoundUpper, Encode};
use crate::{
    clause,
    encodings::{atomics, CollectClauses, EncodeStats, Error, IterInputs, Mode},
    instances::ManageVars,
    types::Lit,
};

/// The implication direction of a sorting or merging network
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Inputs imply outputs. True inputs force the outputs up to their count.
    InputToOutput,
    /// Outputs imply inputs. True outputs force enough inputs to be true.
    OutputToInput,
    /// Both directions, the outputs are equivalent to the sorted inputs
    Both,
}

impl Direction {
    fn forward(self) -> bool {
        matches!(self, Direction::InputToOutput | Direction::Both)
    }

    fn backward(self) -> bool {
        matches!(self, Direction::OutputToInput | Direction::Both)
    }
}

/// Sorts `lits` in descending order and returns the top `min(m, n)` outputs.
///
/// # Errors
///
/// If the clause collector runs out of memory
pub fn sort<Col>(
    m: usize,
    lits: &[Lit],
    direction: Direction,
    collector: &mut Col,
    var_manager: &mut dyn ManageVars,
) -> Result<Vec<Lit>, crate::OutOfMemory>
where
    Col: CollectClauses,
{
    Network {
        collector,
        var_manager,
    }
    .sort(m, lits, direction)
}

/// Merges the two descending sorted sequences `a` and `b` and returns the top
/// `min(m, |a| + |b|)` outputs.
///
/// # Errors
///
/// If the clause collector runs out of memory
pub fn merge<Col>(
    m: usize,
    a: &[Lit],
    b: &[Lit],
    direction: Direction,
    collector: &mut Col,
    var_manager: &mut dyn ManageVars,
) -> Result<Vec<Lit>, crate::OutOfMemory>
where
    Col: CollectClauses,
{
    Network {
        collector,
        var_manager,
    }
    .merge(m, a, b, direction)
}

/// Clause count of the counter based sorter
#[allow(clippy::cast_possible_wrap)]
fn counter_cost(m: usize, n: usize) -> i128 {
    let (m, n) = (m as i128, n as i128);
    2 * n + (m - 1) * (2 * (n - 1) - 1) - (m - 2) - (m - 1) * (m - 2)
}

/// Clause count of the direct sorter
fn direct_cost(n: usize) -> i128 {
    if n > 30 {
        i128::MAX
    } else {
        (1_i128 << n) - 1
    }
}

/// Clause sink and variable source shared by the recursive network
/// construction
struct Network<'a, Col> {
    collector: &'a mut Col,
    var_manager: &'a mut dyn ManageVars,
}

impl<Col> Network<'_, Col>
where
    Col: CollectClauses,
{
    fn new_lits(&mut self, n: usize) -> Vec<Lit> {
        (0..n).map(|_| self.var_manager.new_lit()).collect()
    }

    fn sort(
        &mut self,
        m: usize,
        lits: &[Lit],
        direction: Direction,
    ) -> Result<Vec<Lit>, crate::OutOfMemory> {
        let n = lits.len();
        let m = cmp::min(m, n);
        if m == 0 {
            return Ok(vec![]);
        }
        if n == 1 {
            return Ok(vec![lits[0]]);
        }
        if n == 2 {
            let out = self.new_lits(m);
            if m == 2 {
                self.comparator2(lits[0], lits[1], out[0], out[1], direction)?;
            } else {
                self.comparator1(lits[0], lits[1], out[0], direction)?;
            }
            return Ok(out);
        }
        if direction != Direction::InputToOutput {
            return self.recursive_sorter(m, lits, direction);
        }
        if counter_cost(m, n) < direct_cost(n) {
            self.counter_sorter(m, lits)
        } else {
            self.direct_sorter(m, lits)
        }
    }

    fn merge(
        &mut self,
        m: usize,
        a: &[Lit],
        b: &[Lit],
        direction: Direction,
    ) -> Result<Vec<Lit>, crate::OutOfMemory> {
        if m == 0 {
            return Ok(vec![]);
        }
        if a.is_empty() {
            return Ok(b.to_vec());
        }
        if b.is_empty() {
            return Ok(a.to_vec());
        }
        let m = cmp::min(m, a.len() + b.len());
        if direction == Direction::InputToOutput {
            return self.direct_merger(m, a, b);
        }
        let out = self.recursive_merger(m, a, b, direction)?;
        debug_assert_eq!(out.len(), m);
        Ok(out)
    }

    /// `y` is the maximum of `x1` and `x2`
    fn comparator1(
        &mut self,
        x1: Lit,
        x2: Lit,
        y: Lit,
        direction: Direction,
    ) -> Result<(), crate::OutOfMemory> {
        debug_assert_ne!(x1, x2);
        if direction.forward() {
            self.collector.extend_clauses([
                atomics::lit_impl_lit(x1, y),
                atomics::lit_impl_lit(x2, y),
            ])?;
        }
        if direction.backward() {
            self.collector.add_clause(clause![!y, x1, x2])?;
        }
        Ok(())
    }

    /// `y1` is the maximum and `y2` the minimum of `x1` and `x2`
    fn comparator2(
        &mut self,
        x1: Lit,
        x2: Lit,
        y1: Lit,
        y2: Lit,
        direction: Direction,
    ) -> Result<(), crate::OutOfMemory> {
        debug_assert_ne!(x1, x2);
        debug_assert_ne!(y1, y2);
        if direction.forward() {
            self.collector.extend_clauses([
                atomics::lit_impl_lit(x1, y1),
                atomics::lit_impl_lit(x2, y1),
                atomics::cube_impl_lit(&[x1, x2], y2),
            ])?;
        }
        if direction.backward() {
            self.collector.extend_clauses([
                clause![!y1, x1, x2],
                atomics::lit_impl_lit(y2, x1),
                atomics::lit_impl_lit(y2, x2),
            ])?;
        }
        Ok(())
    }

    fn recursive_sorter(
        &mut self,
        m: usize,
        lits: &[Lit],
        direction: Direction,
    ) -> Result<Vec<Lit>, crate::OutOfMemory> {
        let (a, b) = lits.split_at(lits.len() / 2);
        let sorted_a = self.sort(m, a, direction)?;
        let sorted_b = self.sort(m, b, direction)?;
        debug_assert_eq!(sorted_a.len(), cmp::min(m, a.len()));
        debug_assert_eq!(sorted_b.len(), cmp::min(m, b.len()));
        self.merge(m, &sorted_a, &sorted_b, direction)
    }

    /// Sequential counter with `counts[i][j]` meaning that at least `j + 1` of
    /// the first `i + 1` inputs are true. Only propagates from inputs to
    /// outputs.
    fn counter_sorter(&mut self, k: usize, lits: &[Lit]) -> Result<Vec<Lit>, crate::OutOfMemory> {
        let n = lits.len();
        let mut counts: Vec<Vec<Lit>> = (0..n)
            .map(|i| Vec::with_capacity(cmp::min(i + 1, k)))
            .collect();
        for j in 0..k {
            for row in &mut counts[j..] {
                row.push(self.var_manager.new_lit());
            }
        }
        for i in 0..n {
            self.collector
                .add_clause(atomics::lit_impl_lit(lits[i], counts[i][0]))?;
            if i > 0 {
                self.collector
                    .add_clause(atomics::lit_impl_lit(counts[i - 1][0], counts[i][0]))?;
            }
        }
        for j in 1..k {
            for i in j..n {
                self.collector.add_clause(atomics::cube_impl_lit(
                    &[lits[i], counts[i - 1][j - 1]],
                    counts[i][j],
                ))?;
                if i > j {
                    self.collector
                        .add_clause(atomics::lit_impl_lit(counts[i - 1][j], counts[i][j]))?;
                }
            }
        }
        let out = counts.pop().unwrap_or_default();
        debug_assert_eq!(out.len(), k);
        Ok(out)
    }

    /// Enumerates all input subsets of size up to `m`, each forcing the
    /// output of its size. Only propagates from inputs to outputs.
    fn direct_sorter(&mut self, m: usize, lits: &[Lit]) -> Result<Vec<Lit>, crate::OutOfMemory> {
        let n = lits.len();
        debug_assert!(n < 20);
        let out = self.new_lits(m);
        for mask in 1_u32..(1 << n) {
            let count = mask.count_ones() as usize;
            if count > m {
                continue;
            }
            let subset: Vec<_> = lits
                .iter()
                .enumerate()
                .filter(|&(i, _)| mask & (1 << i) != 0)
                .map(|(_, &l)| l)
                .collect();
            self.collector
                .add_clause(atomics::cube_impl_lit(&subset, out[count - 1]))?;
        }
        Ok(out)
    }

    /// Odd-even merger of two sorted sequences to `c` outputs
    fn recursive_merger(
        &mut self,
        c: usize,
        a: &[Lit],
        b: &[Lit],
        direction: Direction,
    ) -> Result<Vec<Lit>, crate::OutOfMemory> {
        let a = &a[..cmp::min(c, a.len())];
        let b = &b[..cmp::min(c, b.len())];
        if c == 1 {
            let y = self.var_manager.new_lit();
            self.comparator1(a[0], b[0], y, direction)?;
            return Ok(vec![y]);
        }
        if a.len() == 1 && b.len() == 1 {
            debug_assert_eq!(c, 2);
            let y1 = self.var_manager.new_lit();
            let y2 = self.var_manager.new_lit();
            self.comparator2(a[0], b[0], y1, y2, direction)?;
            return Ok(vec![y1, y2]);
        }
        let odd_a: Vec<_> = a.iter().copied().step_by(2).collect();
        let odd_b: Vec<_> = b.iter().copied().step_by(2).collect();
        let even_a: Vec<_> = a.iter().copied().skip(1).step_by(2).collect();
        let even_b: Vec<_> = b.iter().copied().skip(1).step_by(2).collect();
        let odd = self.merge(c / 2 + 1, &odd_a, &odd_b, direction)?;
        let even = self.merge(c / 2, &even_a, &even_b, direction)?;

        let mut out = Vec::with_capacity(c);
        out.push(odd[0]);
        let mut i = 1;
        let mut j = 0;
        loop {
            match (odd.get(i), even.get(j)) {
                (Some(&o), Some(&e)) => {
                    if out.len() + 2 <= c {
                        let z0 = self.var_manager.new_lit();
                        let z1 = self.var_manager.new_lit();
                        self.comparator2(o, e, z0, z1, direction)?;
                        out.push(z0);
                        out.push(z1);
                        if out.len() == c {
                            return Ok(out);
                        }
                    } else if out.len() + 1 == c {
                        let z0 = self.var_manager.new_lit();
                        self.comparator1(o, e, z0, direction)?;
                        out.push(z0);
                        return Ok(out);
                    }
                }
                (None, None) => return Ok(out),
                (None, Some(_)) => out.extend(even.last().copied()),
                (Some(_), None) => out.extend(odd.last().copied()),
            }
            i += 1;
            j += 1;
        }
    }

    /// Merger connecting every pair of inputs to the output of their sum.
    /// Only propagates from inputs to outputs.
    fn direct_merger(&mut self, m: usize, a: &[Lit], b: &[Lit]) -> Result<Vec<Lit>, crate::OutOfMemory> {
        let out = self.new_lits(m);
        for (&ai, &oi) in a.iter().zip(&out) {
            self.collector.add_clause(atomics::lit_impl_lit(ai, oi))?;
        }
        for (&bi, &oi) in b.iter().zip(&out) {
            self.collector.add_clause(atomics::lit_impl_lit(bi, oi))?;
        }
        for (i, &ai) in a.iter().enumerate() {
            for (j, &bj) in b.iter().enumerate() {
                if i + j + 1 < m {
                    self.collector
                        .add_clause(atomics::cube_impl_lit(&[ai, bj], out[i + j + 1]))?;
                }
            }
        }
        Ok(out)
    }
}

/// Cardinality constraint encoding based on sorting networks.
///
/// In [`Mode::Static`], upper bounds `ub > n / 2` and lower bounds
/// `lb < n / 2` are encoded by sorting the negated inputs, so that the
/// smaller side of the constraint determines the network size.
/// In [`Mode::Incremental`], nothing is asserted. An input to output network
/// for upper bounds and an output to input network for lower bounds are kept,
/// and every bound they cover is enforced by assuming one of their outputs.
/// Encoding a bound beyond a network's outputs sorts the inputs again with
/// more outputs.
///
/// # References
///
/// - Roberto Asín, Robert Nieuwenhuis, Albert Oliveras and Enric
///   Rodríguez-Carbonell: _Cardinality Networks: a theoretical and empirical
///   study_, Constraints 2011.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardinalityNetwork {
    /// Input literals
    in_lits: Vec<Lit>,
    /// Static or incremental
    mode: Mode,
    /// The lowest upper bound asserted so far, in static mode
    ub: Option<usize>,
    /// The highest lower bound asserted so far, in static mode
    lb: Option<usize>,
    /// Upper bound outputs kept in incremental mode
    ub_outputs: Vec<Lit>,
    /// Lower bound outputs kept in incremental mode
    lb_outputs: Vec<Lit>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl CardinalityNetwork {
    /// Sets the mode of the encoding
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Gets the outputs of the upper bound network in incremental mode.
    /// Output `k` is true if more than `k` inputs are true.
    #[must_use]
    pub fn ub_outputs(&self) -> &[Lit] {
        &self.ub_outputs
    }

    /// Gets the outputs of the lower bound network in incremental mode.
    /// Output `k` can only be true if more than `k` inputs are true.
    #[must_use]
    pub fn lb_outputs(&self) -> &[Lit] {
        &self.lb_outputs
    }

    fn record<Col: CollectClauses>(
        &mut self,
        collector: &Col,
        var_manager: &dyn ManageVars,
        prev: (usize, u32),
    ) {
        self.n_clauses += collector.n_clauses() - prev.0;
        self.n_vars += var_manager.n_used() - prev.1;
    }

    /// Encodes and asserts `sum of lits = b`. For `b > n` an empty clause is
    /// added. The bound is asserted with hard clauses in both modes and does
    /// not change the incremental networks.
    ///
    /// # Errors
    ///
    /// If the clause collector runs out of memory
    #[tracing::instrument(level = "debug", name = "sorting_exk", skip_all, fields(n_lits = self.in_lits.len(), b = b))]
    pub fn encode_eq<Col>(
        &mut self,
        b: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n = self.in_lits.len();
        let prev = (collector.n_clauses(), var_manager.n_used());
        if b > n {
            collector.add_clause(clause![])?;
        } else if b == 0 {
            collector.extend_clauses(atomics::neg_units(&self.in_lits))?;
        } else if b == n {
            collector.extend_clauses(self.in_lits.iter().map(|&l| clause![l]))?;
        } else {
            let out = sort(b + 1, &self.in_lits, Direction::Both, collector, var_manager)?;
            collector.extend_clauses([clause![!out[b]], clause![out[b - 1]]])?;
        }
        if self.mode == Mode::Static {
            self.ub = Some(cmp::min(self.ub.unwrap_or(b), b));
            self.lb = Some(cmp::max(self.lb.unwrap_or(b), b));
        }
        self.record(collector, var_manager, prev);
        Ok(())
    }
}

impl Encode for CardinalityNetwork {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }
}

impl BoundUpper for CardinalityNetwork {
    #[tracing::instrument(level = "debug", name = "sorting_amk", skip_all, fields(n_lits = self.in_lits.len(), ub = ub))]
    fn encode_ub<Col>(
        &mut self,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n = self.in_lits.len();
        let prev = (collector.n_clauses(), var_manager.n_used());
        match self.mode {
            Mode::Static => {
                if self.ub.is_some_and(|old| old <= ub) || ub >= n {
                    return Ok(());
                }
                if ub > n / 2 {
                    let geq = n - ub;
                    let negated: Vec<_> = self.in_lits.iter().map(|&l| !l).collect();
                    let out = sort(geq, &negated, Direction::OutputToInput, collector, var_manager)?;
                    collector.extend_clauses(out.into_iter().map(|l| clause![l]))?;
                } else {
                    let out = sort(ub + 1, &self.in_lits, Direction::InputToOutput, collector, var_manager)?;
                    collector.add_clause(clause![!out[ub]])?;
                }
                self.ub = Some(ub);
            }
            Mode::Incremental => {
                if ub >= n || ub < self.ub_outputs.len() {
                    return Ok(());
                }
                self.ub_outputs = sort(ub + 1, &self.in_lits, Direction::InputToOutput, collector, var_manager)?;
                tracing::debug!(n_outputs = self.ub_outputs.len(), "sorted for upper bounds");
            }
        }
        self.record(collector, var_manager, prev);
        Ok(())
    }

    fn enforce_ub(&self, ub: usize) -> Result<Vec<Lit>, Error> {
        if ub >= self.in_lits.len() {
            return Ok(vec![]);
        }
        match self.mode {
            Mode::Static if self.ub.is_some_and(|enc_ub| ub >= enc_ub) => Ok(vec![]),
            Mode::Incremental if ub < self.ub_outputs.len() => Ok(vec![!self.ub_outputs[ub]]),
            _ => Err(Error::NotEncoded),
        }
    }
}

impl BoundLower for CardinalityNetwork {
    #[tracing::instrument(level = "debug", name = "sorting_alk", skip_all, fields(n_lits = self.in_lits.len(), lb = lb))]
    fn encode_lb<Col>(
        &mut self,
        lb: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let n = self.in_lits.len();
        if lb > n {
            return Err(Error::Unsat);
        }
        if lb == 0 {
            return Ok(());
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        if self.mode == Mode::Incremental {
            if lb > self.lb_outputs.len() {
                self.lb_outputs = sort(lb, &self.in_lits, Direction::OutputToInput, collector, var_manager)?;
                tracing::debug!(n_outputs = self.lb_outputs.len(), "sorted for lower bounds");
                self.record(collector, var_manager, prev);
            }
            return Ok(());
        }
        if self.lb.is_some_and(|old| old >= lb) {
            return Ok(());
        }
        // at least `lb` inputs true is at most `n - lb` negated inputs true
        let flipped = n - lb;
        if flipped > n / 2 {
            let out = sort(lb, &self.in_lits, Direction::OutputToInput, collector, var_manager)?;
            collector.extend_clauses(out.into_iter().map(|l| clause![l]))?;
        } else {
            let negated: Vec<_> = self.in_lits.iter().map(|&l| !l).collect();
            let out = sort(flipped + 1, &negated, Direction::InputToOutput, collector, var_manager)?;
            collector.add_clause(clause![!out[flipped]])?;
        }
        self.lb = Some(lb);
        self.record(collector, var_manager, prev);
        Ok(())
    }

    fn enforce_lb(&self, lb: usize) -> Result<Vec<Lit>, Error> {
        if lb > self.in_lits.len() {
            return Err(Error::Unsat);
        }
        if lb == 0 {
            return Ok(vec![]);
        }
        match self.mode {
            Mode::Static if self.lb.is_some_and(|enc_lb| lb <= enc_lb) => Ok(vec![]),
            Mode::Incremental if lb <= self.lb_outputs.len() => Ok(vec![self.lb_outputs[lb - 1]]),
            _ => Err(Error::NotEncoded),
        }
    }
}

impl EncodeStats for CardinalityNetwork {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl IterInputs for CardinalityNetwork {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>>;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl From<Vec<Lit>> for CardinalityNetwork {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            ..Default::default()
        }
    }
}

impl FromIterator<Lit> for CardinalityNetwork {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}
