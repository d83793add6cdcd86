//! # Modular Totalizer Encoding
//!
//! Totalizer variant that represents counts in mixed radix: every node keeps
//! an `upper` unary vector counting multiples of a modulus and a `lower`
//! unary vector counting the remainder \[1\]. Compared to the plain totalizer
//! this reduces the number of auxiliary variables for large bounds.
//!
//! The modulus is `ceil(sqrt(rhs + 1))` for the first bound the tree is built
//! for and stays fixed afterwards. Later bound changes reuse the tree and only
//! emit the clauses that the new bound additionally requires.
//!
//! Lower bounds are encoded as upper bounds on the negated input literals in
//! a separate tree.
//!
//! ## References
//!
//! - \[1\] Toru Ogawa and Yangyang Liu and Ryuzo Hasegawa and Miyuki Koshimura and Hiroshi Fujita: _Modulo Based CNF Encoding of Cardinality Constraints and Its Application to MaxSAT Solvers_, ICTAI 2013.

use std::cmp::{self, Ordering};

use super::{BoundLower, BoundUpper, BoundUpperIncremental, Encode};
use crate::{
    encodings::{atomics, CollectClauses, EncodeStats, Error, IterInputs, Mode},
    instances::ManageVars,
    types::{Clause, Lit, RsHashMap},
    utils,
};

/// Index of a node in the counter arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct NodeId(usize);

/// A node of a modular counter tree
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Node {
    /// An input literal, counting as remainder one
    Leaf(Lit),
    Internal {
        /// `upper[k]` is true if the count is at least `(k + 1) * modulus`
        upper: Vec<Lit>,
        /// `lower[k]` is true if the count modulo the modulus is at least `k + 1`
        lower: Vec<Lit>,
        /// Set if the remainders of the children overflow the modulus. Only
        /// exists if `upper` is not empty.
        carry: Option<Lit>,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    fn lower(&self) -> &[Lit] {
        match self {
            Node::Leaf(lit) => std::slice::from_ref(lit),
            Node::Internal { lower, .. } => lower,
        }
    }

    fn upper(&self) -> &[Lit] {
        match self {
            Node::Leaf(_) => &[],
            Node::Internal { upper, .. } => upper,
        }
    }
}

/// The modulus used for a tree first built for `rhs`
fn modulus(rhs: usize) -> usize {
    cmp::max(utils::ceil_sqrt(rhs + 1), 2)
}

/// A modular counter tree over at least two literals. The root is the last
/// node in the arena.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Counter {
    nodes: Vec<Node>,
    n_lits: usize,
    modulus: usize,
    /// The count target the adder clauses are emitted for, `rhs + 1` of the
    /// largest bound encoded so far
    target: Option<usize>,
    /// The bound asserted with hard clauses, in static mode
    asserted: Option<usize>,
    /// Literals that enforce a bound when assumed, in incremental mode
    guards: RsHashMap<usize, Lit>,
}

impl Counter {
    fn new(lits: &[Lit], rhs: usize, var_manager: &mut dyn ManageVars) -> Self {
        debug_assert!(lits.len() >= 2);
        let mut counter = Counter {
            nodes: vec![],
            n_lits: lits.len(),
            modulus: modulus(cmp::min(rhs, lits.len())),
            target: None,
            asserted: None,
            guards: RsHashMap::default(),
        };
        counter.build_tree(lits, var_manager);
        tracing::debug!(
            n_lits = lits.len(),
            modulus = counter.modulus,
            n_nodes = counter.nodes.len(),
            "built modular counter"
        );
        counter
    }

    fn root(&self) -> &Node {
        self.nodes.last().expect("counter tree is never empty")
    }

    /// Builds the tree bottom up. Inputs are taken in order through the
    /// `start` cursor of each range, halves are split as `size / 2` and
    /// `size - size / 2`.
    fn build_tree(&mut self, lits: &[Lit], var_manager: &mut dyn ManageVars) {
        let md = self.modulus;
        // (start, size, children built)
        let mut open = vec![(0, lits.len(), false)];
        let mut built = Vec::new();
        while let Some((start, size, children_built)) = open.pop() {
            if size == 1 {
                self.nodes.push(Node::Leaf(lits[start]));
                built.push(NodeId(self.nodes.len() - 1));
                continue;
            }
            if children_built {
                let right = built.pop().expect("right subtree built before parent");
                let left = built.pop().expect("left subtree built before parent");
                let upper: Vec<_> = (0..size / md).map(|_| var_manager.new_lit()).collect();
                let lower = (0..cmp::min(size, md - 1))
                    .map(|_| var_manager.new_lit())
                    .collect();
                let carry = if upper.is_empty() {
                    None
                } else {
                    Some(var_manager.new_lit())
                };
                self.nodes.push(Node::Internal {
                    upper,
                    lower,
                    carry,
                    left,
                    right,
                });
                built.push(NodeId(self.nodes.len() - 1));
                continue;
            }
            let split = size / 2;
            open.push((start, size, true));
            open.push((start + split, size - split, false));
            open.push((start, split, false));
        }
        debug_assert_eq!(built.len(), 1);
    }

    /// Whether the remainder adder clause for sum `sum` is needed for count
    /// target `target`
    fn lower_needed(&self, sum: usize, target: usize) -> bool {
        sum <= target + 1 || target + 1 >= self.modulus
    }

    /// Whether the quotient adder clauses for sum `sum` are needed for count
    /// target `target`
    fn upper_needed(&self, sum: usize, target: usize) -> bool {
        sum <= utils::ceil_div(target, self.modulus)
    }

    /// Emits the adder clauses of all nodes for count target `target` that
    /// were not emitted for a previous target
    fn encode_adders<Col>(&mut self, target: usize, collector: &mut Col) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let old = self.target;
        if old.is_some_and(|old| old >= target) {
            return Ok(());
        }
        for idx in 0..self.nodes.len() {
            let mut clauses = self.adder(idx, old, target);
            let n_lower = clauses.len();
            clauses.extend(self.final_adder(idx, old, target));
            tracing::trace!(
                node = idx,
                n_lower = n_lower,
                n_upper = clauses.len() - n_lower,
                "modular adder"
            );
            collector.extend_clauses(clauses)?;
        }
        self.target = Some(target);
        Ok(())
    }

    /// Remainder adder of a node: sums below the modulus go to `lower`, a sum
    /// equal to the modulus sets the carry and larger sums wrap around
    fn adder(&self, idx: usize, old: Option<usize>, target: usize) -> Vec<Clause> {
        let Node::Internal {
            ref lower,
            carry,
            left,
            right,
            ..
        } = self.nodes[idx]
        else {
            return vec![];
        };
        let md = self.modulus;
        let llower = self.nodes[left.0].lower();
        let rlower = self.nodes[right.0].lower();
        let mut clauses = vec![];
        for i in 0..=llower.len() {
            for j in 0..=rlower.len() {
                let sum = i + j;
                if sum == 0
                    || !self.lower_needed(sum, target)
                    || old.is_some_and(|old| self.lower_needed(sum, old))
                {
                    continue;
                }
                let mut cl = Clause::with_capacity(4);
                if i > 0 {
                    cl.add(!llower[i - 1]);
                }
                if j > 0 {
                    cl.add(!rlower[j - 1]);
                }
                match sum.cmp(&md) {
                    Ordering::Less => {
                        cl.add(lower[sum - 1]);
                        if let Some(carry) = carry {
                            cl.add(carry);
                        }
                    }
                    Ordering::Equal => {
                        cl.add(carry.expect("sums reaching the modulus imply an upper vector"));
                    }
                    Ordering::Greater => cl.add(lower[sum % md - 1]),
                }
                clauses.push(cl);
            }
        }
        clauses
    }

    /// Quotient adder of a node: adds the quotients of the children and the
    /// carry into `upper`
    fn final_adder(&self, idx: usize, old: Option<usize>, target: usize) -> Vec<Clause> {
        let Node::Internal {
            ref upper,
            carry: Some(carry),
            left,
            right,
            ..
        } = self.nodes[idx]
        else {
            return vec![];
        };
        let lupper = self.nodes[left.0].upper();
        let rupper = self.nodes[right.0].upper();
        let mut clauses = vec![];
        for i in 0..=lupper.len() {
            for j in 0..=rupper.len() {
                let sum = i + j;
                if !self.upper_needed(sum, target)
                    || old.is_some_and(|old| self.upper_needed(sum, old))
                {
                    continue;
                }
                let a = i.checked_sub(1).map(|i| lupper[i]);
                let b = j.checked_sub(1).map(|j| rupper[j]);
                let premise: Vec<Lit> = a.into_iter().chain(b).map(|l| !l).collect();
                if !premise.is_empty() {
                    if let Some(&c) = sum.checked_sub(1).and_then(|s| upper.get(s)) {
                        let mut cl: Clause = premise.iter().copied().collect();
                        cl.add(c);
                        clauses.push(cl);
                    }
                }
                let d = upper.get(sum).copied();
                if !premise.is_empty() || d.is_some() {
                    let mut cl = Clause::with_capacity(4);
                    cl.add(!carry);
                    cl.extend(premise);
                    if let Some(d) = d {
                        cl.add(d);
                    }
                    clauses.push(cl);
                }
            }
        }
        clauses
    }

    /// The clauses forbidding root counts larger than `rhs`
    fn encode_output(&self, rhs: usize) -> Vec<Clause> {
        debug_assert!(rhs < self.n_lits);
        let md = self.modulus;
        let (upper, lower) = (self.root().upper(), self.root().lower());
        let ulimit = (rhs + 1) / md;
        let llimit = rhs + 1 - ulimit * md;
        debug_assert!(ulimit <= upper.len());
        debug_assert!(llimit <= lower.len());
        let mut clauses: Vec<Clause> = atomics::neg_units(&upper[ulimit..]).collect();
        match (ulimit, llimit) {
            (0, llimit) => clauses.extend(atomics::neg_units(&lower[llimit - 1..])),
            (ulimit, 0) => clauses.push(crate::clause![!upper[ulimit - 1]]),
            (ulimit, llimit) => clauses.extend(
                lower[llimit - 1..]
                    .iter()
                    .map(|&l| crate::clause![!upper[ulimit - 1], !l]),
            ),
        }
        clauses
    }

    /// Asserts `rhs` with hard clauses, only emitting what an earlier asserted
    /// bound did not already emit
    fn assert_bound<Col>(&mut self, rhs: usize, collector: &mut Col) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.encode_adders(rhs + 1, collector)?;
        let mut clauses = self.encode_output(rhs);
        if let Some(old) = self.asserted {
            if rhs >= old {
                return Ok(());
            }
            let old = self.encode_output(old);
            clauses.retain(|cl| !old.contains(cl));
        }
        collector.extend_clauses(clauses)?;
        self.asserted = Some(rhs);
        Ok(())
    }

    /// Extends the adders to `rhs` and encodes the output clauses for `rhs`
    /// under a fresh guard literal
    fn guard_bound<Col>(
        &mut self,
        rhs: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.encode_adders(cmp::min(rhs, self.n_lits) + 1, collector)?;
        if rhs >= self.n_lits || self.guard(rhs).is_some() {
            return Ok(());
        }
        let guard = var_manager.new_lit();
        collector.extend_clauses(self.encode_output(rhs).into_iter().map(|mut cl| {
            cl.add(!guard);
            cl
        }))?;
        self.guards.insert(rhs, guard);
        Ok(())
    }

    fn guard(&self, rhs: usize) -> Option<Lit> {
        self.guards.get(&rhs).copied()
    }
}

/// Encodes `sum of lits <= rhs` into the counter in `slot`, building it if
/// needed
fn bound_count<Col>(
    slot: &mut Option<Counter>,
    lits: &[Lit],
    rhs: usize,
    mode: Mode,
    collector: &mut Col,
    var_manager: &mut dyn ManageVars,
) -> Result<(), Error>
where
    Col: CollectClauses,
{
    let n = lits.len();
    match mode {
        Mode::Static => {
            if rhs >= n {
                return Ok(());
            }
            if rhs == 0 && slot.is_none() {
                collector.extend_clauses(atomics::neg_units(lits))?;
                return Ok(());
            }
            slot.get_or_insert_with(|| Counter::new(lits, rhs, var_manager))
                .assert_bound(rhs, collector)
        }
        Mode::Incremental => {
            if n < 2 {
                return Ok(());
            }
            slot.get_or_insert_with(|| Counter::new(lits, rhs, var_manager))
                .guard_bound(rhs, collector, var_manager)
        }
    }
}

/// Implementation of the modular totalizer encoding \[1\].
///
/// In [`Mode::Static`], bounds are asserted by hard clauses and can only be
/// tightened afterwards. In [`Mode::Incremental`], every encoded bound gets a
/// guard literal that [`BoundUpper::enforce_ub`] returns as assumption, and
/// bounds can be changed in both directions.
///
/// The quotient and remainder vectors of all nodes are allocated when the
/// tree is built. Quotient outputs above the current count target appear in
/// no clause until a larger bound is encoded, and a larger bound only adds
/// clauses and, in incremental mode, its guard literal.
///
/// # References
///
/// - \[1\] Toru Ogawa and Yangyang Liu and Ryuzo Hasegawa and Miyuki Koshimura and Hiroshi Fujita: _Modulo Based CNF Encoding of Cardinality Constraints and Its Application to MaxSAT Solvers_, ICTAI 2013.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModularTotalizer {
    /// Input literals
    in_lits: Vec<Lit>,
    /// Counter over the input literals
    ub_counter: Option<Counter>,
    /// Counter over the negated input literals
    lb_counter: Option<Counter>,
    /// Static or incremental
    mode: Mode,
    /// The current upper bound
    ub: Option<usize>,
    /// The current lower bound
    lb: Option<usize>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl ModularTotalizer {
    /// Sets the mode of the encoding
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Gets the mode of the encoding
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Gets the modulus of the upper bounding tree, if it is built
    #[must_use]
    pub fn modulus(&self) -> Option<usize> {
        self.ub_counter.as_ref().map(|counter| counter.modulus)
    }

    /// Builds the encoding for `sum of lits <= rhs`. If the encoding was
    /// already built, this is the same as [`ModularTotalizer::update`].
    ///
    /// # Errors
    ///
    /// See [`ModularTotalizer::update`]
    #[tracing::instrument(level = "debug", name = "modtotalizer_build", skip_all, fields(n_lits = self.in_lits.len(), rhs = rhs))]
    pub fn build<Col>(
        &mut self,
        rhs: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        if self.ub.is_some() {
            return self.update(rhs, collector, var_manager);
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        bound_count(
            &mut self.ub_counter,
            &self.in_lits,
            rhs,
            self.mode,
            collector,
            var_manager,
        )?;
        self.ub = Some(rhs);
        self.record(collector, var_manager, prev);
        Ok(())
    }

    /// Changes the upper bound to `rhs`, keeping the modulus of the first
    /// build. Only clauses that were not emitted before are emitted. In
    /// static mode the bound can only be tightened.
    ///
    /// # Errors
    ///
    /// - [`Error::NotEncoded`] if [`ModularTotalizer::build`] was not called
    ///   before
    /// - [`Error::NotIncremental`] if a static encoding would need to relax
    ///   its bound
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    #[tracing::instrument(level = "debug", name = "modtotalizer_update", skip_all, fields(n_lits = self.in_lits.len(), rhs = rhs))]
    pub fn update<Col>(
        &mut self,
        rhs: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let Some(old) = self.ub else {
            return Err(Error::NotEncoded);
        };
        if self.mode == Mode::Static {
            if rhs > old && old < self.in_lits.len() {
                return Err(Error::NotIncremental);
            }
            if rhs >= old {
                self.ub = Some(rhs);
                return Ok(());
            }
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        bound_count(
            &mut self.ub_counter,
            &self.in_lits,
            rhs,
            self.mode,
            collector,
            var_manager,
        )?;
        self.ub = Some(rhs);
        self.record(collector, var_manager, prev);
        Ok(())
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
}

impl Encode for ModularTotalizer {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }
}

impl BoundUpper for ModularTotalizer {
    fn encode_ub<Col>(
        &mut self,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.build(ub, collector, var_manager)
    }

    fn enforce_ub(&self, ub: usize) -> Result<Vec<Lit>, Error> {
        let n = self.in_lits.len();
        if ub >= n {
            return Ok(vec![]);
        }
        let Some(enc) = self.ub else {
            return Err(Error::NotEncoded);
        };
        match self.mode {
            Mode::Static if ub >= enc => Ok(vec![]),
            Mode::Static => Err(Error::NotEncoded),
            Mode::Incremental if n == 1 => Ok(vec![!self.in_lits[0]]),
            Mode::Incremental => self
                .ub_counter
                .as_ref()
                .and_then(|counter| counter.guard(ub))
                .map(|guard| vec![guard])
                .ok_or(Error::NotEncoded),
        }
    }
}

impl BoundUpperIncremental for ModularTotalizer {
    fn encode_ub_change<Col>(
        &mut self,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.update(ub, collector, var_manager)
    }
}

impl BoundLower for ModularTotalizer {
    #[tracing::instrument(level = "debug", name = "modtotalizer_lb", skip_all, fields(n_lits = self.in_lits.len(), lb = lb))]
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
        if lb == 0 || (self.mode == Mode::Static && self.lb.is_some_and(|old| lb <= old)) {
            return Ok(());
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        let negated: Vec<Lit> = self.in_lits.iter().map(|&l| !l).collect();
        bound_count(
            &mut self.lb_counter,
            &negated,
            n - lb,
            self.mode,
            collector,
            var_manager,
        )?;
        self.lb = Some(match self.mode {
            Mode::Static => cmp::max(lb, self.lb.unwrap_or(0)),
            Mode::Incremental => lb,
        });
        self.record(collector, var_manager, prev);
        Ok(())
    }

    fn enforce_lb(&self, lb: usize) -> Result<Vec<Lit>, Error> {
        let n = self.in_lits.len();
        if lb > n {
            return Err(Error::Unsat);
        }
        if lb == 0 {
            return Ok(vec![]);
        }
        let Some(enc) = self.lb else {
            return Err(Error::NotEncoded);
        };
        match self.mode {
            Mode::Static if lb <= enc => Ok(vec![]),
            Mode::Static => Err(Error::NotEncoded),
            Mode::Incremental if n == 1 => Ok(vec![self.in_lits[0]]),
            Mode::Incremental => self
                .lb_counter
                .as_ref()
                .and_then(|counter| counter.guard(n - lb))
                .map(|guard| vec![guard])
                .ok_or(Error::NotEncoded),
        }
    }
}

impl EncodeStats for ModularTotalizer {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl IterInputs for ModularTotalizer {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>>;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl From<Vec<Lit>> for ModularTotalizer {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            ..Default::default()
        }
    }
}

impl FromIterator<Lit> for ModularTotalizer {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}
