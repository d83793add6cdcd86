//! # Totalizer Encoding
//!
//! Implementation of the binary adder tree totalizer encoding \[1\].
//! The implementation is incremental as extended in \[2\]: the upper bound can
//! be changed after the initial encoding, emitting only the adder clauses that
//! are new for the changed bound, and further literals can be joined into the
//! tree.
//!
//! The tree is stored in an arena of nodes that refer to their children by
//! index. Leaves are the input literals themselves.
//!
//! ## References
//!
//! - \[1\] Olivier Bailleux and Yacine Boufkhad: _Efficient CNF Encoding of Boolean Cardinality Constraints_, CP 2003.
//! - \[2\] Ruben Martins and Saurabh Joshi and Vasco Manquinho and Ines Lynce: _Incremental Cardinality Constraints for MaxSAT_, CP 2014.

use std::cmp;

use super::{BoundLower, BoundUpper, BoundUpperIncremental, Encode};
use crate::{
    clause,
    encodings::{atomics, CollectClauses, EncodeStats, Error, IterInputs, Mode},
    instances::ManageVars,
    types::{Clause, Lit},
};

/// Index of a node in the tree arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct NodeId(usize);

/// A node of the totalizer tree
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Node {
    /// An input literal
    Leaf(Lit),
    /// An adder over two subtrees
    Internal {
        /// Output `k` is true if more than `k` leaves below are true
        out: Vec<Lit>,
        left: NodeId,
        right: NodeId,
        /// Upper bound adder clauses are emitted for all sums up to this
        ub_sums: usize,
        /// Whether the lower bound adder clauses are emitted
        lb_done: bool,
    },
}

/// Implementation of the binary adder tree totalizer encoding \[1\].
/// The implementation is incremental as extended in \[2\].
///
/// In [`Mode::Static`], bounds are asserted by unit clauses on the root
/// outputs. An upper bound of zero is asserted directly on the input literals
/// and bounds of at least the number of inputs are trivially satisfied, in
/// both cases no tree is built.
///
/// Every internal node allocates one output per leaf below it when it is
/// created, so changing the bound later never needs new variables. Outputs
/// above the encoded upper bound appear in no clause until a larger bound or
/// a lower bound is encoded.
///
/// # References
///
/// - \[1\] Olivier Bailleux and Yacine Boufkhad: _Efficient CNF Encoding of Boolean Cardinality Constraints_, CP 2003.
/// - \[2\] Ruben Martins and Saurabh Joshi and Vasco Manquinho and Ines Lynce: _Incremental Cardinality Constraints for MaxSAT_, CP 2014.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Totalizer {
    /// Input literals
    in_lits: Vec<Lit>,
    /// The number of input literals covered by the tree
    n_in_tree: usize,
    /// The node arena
    nodes: Vec<Node>,
    /// The root of the tree, if constructed
    root: Option<NodeId>,
    /// Static or incremental
    mode: Mode,
    /// The current upper bound. In static mode this bound is asserted.
    ub: Option<usize>,
    /// The current lower bound. In static mode this bound is asserted.
    lb: Option<usize>,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl Totalizer {
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

    /// Gets the output literals of the root, in unary representation. Empty
    /// if no tree is built.
    #[must_use]
    pub fn outputs(&self) -> &[Lit] {
        match self.root {
            Some(root) => self.node_lits(root),
            None => &[],
        }
    }

    /// Builds the encoding for `sum of lits <= rhs`. If the encoding was
    /// already built, this is the same as [`Totalizer::update`].
    ///
    /// # Errors
    ///
    /// See [`Totalizer::update`]
    #[tracing::instrument(level = "debug", name = "totalizer_build", skip_all, fields(n_lits = self.in_lits.len(), rhs = rhs))]
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
        let n = self.in_lits.len();
        match self.mode {
            Mode::Static => {
                if rhs == 0 {
                    collector.extend_clauses(atomics::neg_units(&self.in_lits))?;
                } else if rhs < n {
                    self.extend_tree(var_manager);
                    self.encode_ub_adders(rhs, collector)?;
                    self.assert_ub(rhs, n, collector)?;
                }
            }
            Mode::Incremental => {
                self.extend_tree(var_manager);
                self.encode_ub_adders(rhs, collector)?;
            }
        }
        self.ub = Some(rhs);
        self.record(collector, var_manager, prev);
        Ok(())
    }

    /// Changes the upper bound to `rhs`, emitting only adder clauses that were
    /// not emitted before. In static mode the bound can only be tightened.
    ///
    /// # Errors
    ///
    /// - [`Error::NotEncoded`] if [`Totalizer::build`] was not called before
    /// - [`Error::NotIncremental`] if a static encoding would need to relax
    ///   its bound
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    #[tracing::instrument(level = "debug", name = "totalizer_update", skip_all, fields(n_lits = self.in_lits.len(), rhs = rhs))]
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
        let prev = (collector.n_clauses(), var_manager.n_used());
        let n = self.in_lits.len();
        match self.mode {
            Mode::Static => {
                if rhs > old && old < n {
                    return Err(Error::NotIncremental);
                }
                if rhs < old && rhs < n {
                    if rhs == 0 {
                        collector.extend_clauses(atomics::neg_units(&self.in_lits))?;
                    } else {
                        self.extend_tree(var_manager);
                        self.encode_ub_adders(rhs, collector)?;
                        self.assert_ub(rhs, cmp::min(old, n), collector)?;
                    }
                }
            }
            Mode::Incremental => {
                self.extend_tree(var_manager);
                self.encode_ub_adders(rhs, collector)?;
            }
        }
        self.ub = Some(rhs);
        self.record(collector, var_manager, prev);
        Ok(())
    }

    /// Joins `lits` into the encoding, which then encodes `sum of all lits <=
    /// rhs`. A subtree is built for the new literals and combined with the
    /// existing tree under a new root. No previously emitted clause is
    /// emitted again.
    ///
    /// # Errors
    ///
    /// - [`Error::NotEncoded`] if [`Totalizer::build`] was not called before
    /// - [`Error::NotIncremental`] if a static encoding has asserted a
    ///   bound smaller than `rhs`
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    #[tracing::instrument(level = "debug", name = "totalizer_join", skip_all, fields(n_lits = self.in_lits.len(), n_joined = lits.len(), rhs = rhs))]
    pub fn join<Col>(
        &mut self,
        lits: &[Lit],
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
        if lits.is_empty() {
            return self.update(rhs, collector, var_manager);
        }
        let old_n = self.in_lits.len();
        if self.mode == Mode::Static && rhs > old && old < old_n {
            return Err(Error::NotIncremental);
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        self.in_lits.extend_from_slice(lits);
        let n = self.in_lits.len();
        match self.mode {
            Mode::Static => {
                if rhs == 0 {
                    let from = if old == 0 { old_n } else { 0 };
                    collector.extend_clauses(atomics::neg_units(&self.in_lits[from..]))?;
                } else if rhs < n {
                    self.extend_tree(var_manager);
                    self.encode_ub_adders(rhs, collector)?;
                    if self.lb.is_some() {
                        self.encode_lb_adders(collector)?;
                    }
                    self.assert_ub(rhs, n, collector)?;
                }
            }
            Mode::Incremental => {
                self.extend_tree(var_manager);
                self.encode_ub_adders(rhs, collector)?;
                if self.lb.is_some() {
                    self.encode_lb_adders(collector)?;
                }
            }
        }
        self.ub = Some(rhs);
        self.record(collector, var_manager, prev);
        tracing::debug!(n_nodes = self.nodes.len(), "joined totalizer");
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

    /// Gets the unary count literals of a node
    fn node_lits(&self, id: NodeId) -> &[Lit] {
        match &self.nodes[id.0] {
            Node::Leaf(lit) => std::slice::from_ref(lit),
            Node::Internal { out, .. } => out,
        }
    }

    /// Builds a tree over the input literals not yet in the tree and, if a
    /// tree exists, combines both under a new root
    fn extend_tree(&mut self, var_manager: &mut dyn ManageVars) {
        let n = self.in_lits.len();
        if self.n_in_tree == n {
            return;
        }
        let subtree = self.build_subtree(self.n_in_tree, n, var_manager);
        self.root = Some(match self.root {
            None => subtree,
            Some(old_root) => {
                let out = (0..n).map(|_| var_manager.new_lit()).collect();
                self.push_internal(out, old_root, subtree)
            }
        });
        self.n_in_tree = n;
    }

    fn push_internal(&mut self, out: Vec<Lit>, left: NodeId, right: NodeId) -> NodeId {
        self.nodes.push(Node::Internal {
            out,
            left,
            right,
            ub_sums: 0,
            lb_done: false,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Builds the tree over `in_lits[start..end]` bottom up, splitting ranges
    /// in half until single literals remain
    fn build_subtree(&mut self, start: usize, end: usize, var_manager: &mut dyn ManageVars) -> NodeId {
        debug_assert!(start < end);
        // (start, end, children built)
        let mut open = vec![(start, end, false)];
        let mut built = Vec::new();
        while let Some((start, end, children_built)) = open.pop() {
            if end - start == 1 {
                self.nodes.push(Node::Leaf(self.in_lits[start]));
                built.push(NodeId(self.nodes.len() - 1));
                continue;
            }
            if children_built {
                let right = built.pop().expect("right subtree built before parent");
                let left = built.pop().expect("left subtree built before parent");
                let out = (start..end).map(|_| var_manager.new_lit()).collect();
                built.push(self.push_internal(out, left, right));
                continue;
            }
            let split = start + (end - start) / 2;
            open.push((start, end, true));
            open.push((split, end, false));
            open.push((start, split, false));
        }
        debug_assert_eq!(built.len(), 1);
        built[0]
    }

    /// Emits the upper bound adder clauses of all nodes for sums up to `rhs + 1`
    fn encode_ub_adders<Col>(&mut self, rhs: usize, collector: &mut Col) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        for idx in 0..self.nodes.len() {
            let Node::Internal {
                ref out,
                left,
                right,
                ub_sums,
                ..
            } = self.nodes[idx]
            else {
                continue;
            };
            let target = cmp::min(rhs.saturating_add(1), out.len());
            if target <= ub_sums {
                continue;
            }
            let left = self.node_lits(left);
            let right = self.node_lits(right);
            let mut clauses = Vec::new();
            for sum in ub_sums + 1..=target {
                for i in sum.saturating_sub(right.len())..=cmp::min(sum, left.len()) {
                    let j = sum - i;
                    let mut cl = Clause::with_capacity(3);
                    if i > 0 {
                        cl.add(!left[i - 1]);
                    }
                    if j > 0 {
                        cl.add(!right[j - 1]);
                    }
                    cl.add(out[sum - 1]);
                    clauses.push(cl);
                }
            }
            tracing::trace!(node = idx, from = ub_sums + 1, to = target, n_clauses = clauses.len(), "upper adder");
            collector.extend_clauses(clauses)?;
            if let Node::Internal { ub_sums, .. } = &mut self.nodes[idx] {
                *ub_sums = target;
            }
        }
        Ok(())
    }

    /// Emits the lower bound adder clauses of all nodes that do not have them
    fn encode_lb_adders<Col>(&mut self, collector: &mut Col) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        for idx in 0..self.nodes.len() {
            let Node::Internal {
                ref out,
                left,
                right,
                lb_done: false,
                ..
            } = self.nodes[idx]
            else {
                continue;
            };
            let left = self.node_lits(left);
            let right = self.node_lits(right);
            let mut clauses = Vec::new();
            for i in 0..=left.len() {
                for j in 0..=right.len() {
                    // fewer than `i` true on the left and fewer than `j` true
                    // on the right
                    let cl = match (i, j) {
                        (0, 0) => continue,
                        (0, j) => clause![right[j - 1], !out[left.len() + j - 1]],
                        (i, 0) => clause![left[i - 1], !out[right.len() + i - 1]],
                        (i, j) => clause![left[i - 1], right[j - 1], !out[i + j - 2]],
                    };
                    clauses.push(cl);
                }
            }
            collector.extend_clauses(clauses)?;
            if let Node::Internal { lb_done, .. } = &mut self.nodes[idx] {
                *lb_done = true;
            }
        }
        Ok(())
    }

    /// Asserts root outputs `from..to` to be false
    fn assert_ub<Col>(&self, from: usize, to: usize, collector: &mut Col) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let out = self.outputs();
        collector.extend_clauses(atomics::neg_units(&out[from..cmp::min(to, out.len())]))?;
        Ok(())
    }

    /// Checks whether the tree covers all inputs
    fn complete(&self) -> bool {
        self.root.is_some() && self.n_in_tree == self.in_lits.len()
    }

    /// Gets the number of upper bound sums encoded at the root
    fn root_ub_sums(&self) -> usize {
        match self.root.map(|root| &self.nodes[root.0]) {
            Some(Node::Leaf(_)) => 1,
            Some(Node::Internal { ub_sums, .. }) => *ub_sums,
            None => 0,
        }
    }

    /// Checks whether the lower bound clauses are encoded at the root
    fn root_lb_done(&self) -> bool {
        match self.root.map(|root| &self.nodes[root.0]) {
            Some(Node::Leaf(_)) => true,
            Some(Node::Internal { lb_done, .. }) => *lb_done,
            None => false,
        }
    }
}

impl Encode for Totalizer {
    fn n_lits(&self) -> usize {
        self.in_lits.len()
    }
}

impl BoundUpper for Totalizer {
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
        if ub >= self.in_lits.len() {
            return Ok(vec![]);
        }
        if self.mode == Mode::Static && self.ub.is_some_and(|enc| ub >= enc) {
            return Ok(vec![]);
        }
        if self.complete() && self.root_ub_sums() > ub {
            return Ok(vec![!self.outputs()[ub]]);
        }
        Err(Error::NotEncoded)
    }
}

impl BoundUpperIncremental for Totalizer {
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

impl BoundLower for Totalizer {
    #[tracing::instrument(level = "debug", name = "totalizer_lb", skip_all, fields(n_lits = self.in_lits.len(), lb = lb))]
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
        let old = self.lb.unwrap_or(0);
        if lb == 0 || (self.mode == Mode::Static && lb <= old) {
            return Ok(());
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        self.extend_tree(var_manager);
        self.encode_lb_adders(collector)?;
        if self.mode == Mode::Static {
            let out = self.outputs();
            collector.extend_clauses(out[old..lb].iter().map(|&l| clause![l]))?;
        }
        self.lb = Some(cmp::max(lb, old));
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
        if self.mode == Mode::Static && self.lb.is_some_and(|enc| lb <= enc) {
            return Ok(vec![]);
        }
        if self.complete() && self.root_lb_done() {
            return Ok(vec![self.outputs()[lb - 1]]);
        }
        Err(Error::NotEncoded)
    }
}

impl EncodeStats for Totalizer {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl IterInputs for Totalizer {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, Lit>>;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl From<Vec<Lit>> for Totalizer {
    fn from(lits: Vec<Lit>) -> Self {
        Self {
            in_lits: lits,
            ..Default::default()
        }
    }
}

impl FromIterator<Lit> for Totalizer {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::Totalizer;
    use crate::{
        clause,
        encodings::{
            card::{BoundBoth, BoundLower, BoundUpper, BoundUpperIncremental, Encode},
            EncodeStats, Error, Mode,
        },
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    #[test]
    fn basic() {
        let mut tot: Totalizer = [lit![0], lit![1], lit![2], lit![3]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        tot.build(1, &mut cnf, &mut vm).unwrap();
        // two nodes with two outputs, root with four outputs
        assert_eq!(vm.n_used(), 12);
        // lower nodes: 2 + 1 each, root: 2 + 3 for sums up to 2, 3 units
        assert_eq!(cnf.len(), 3 + 3 + 5 + 3);
        assert_eq!(tot.n_clauses(), cnf.len());
        assert_eq!(tot.n_vars(), 8);
    }

    #[test]
    fn rhs_zero_units() {
        let mut tot: Totalizer = [lit![0], lit![1], lit![2]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        tot.build(0, &mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 3);
        assert_eq!(cnf.len(), 3);
        assert_eq!(cnf[0], clause![!lit![0]]);
        assert_eq!(cnf[2], clause![!lit![2]]);
    }

    #[test]
    fn rhs_trivial() {
        let mut tot: Totalizer = [lit![0], lit![1], lit![2]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        tot.build(3, &mut cnf, &mut vm).unwrap();
        assert!(cnf.is_empty());
        assert!(tot.outputs().is_empty());
        assert_eq!(tot.enforce_ub(3), Ok(vec![]));
        // tightening afterwards builds the tree
        tot.update(1, &mut cnf, &mut vm).unwrap();
        assert_eq!(tot.outputs().len(), 3);
        assert_eq!(tot.enforce_ub(1), Ok(vec![]));
    }

    #[test]
    fn static_no_relax() {
        let mut tot: Totalizer = [lit![0], lit![1], lit![2]].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        assert_eq!(tot.update(1, &mut cnf, &mut vm), Err(Error::NotEncoded));
        tot.build(1, &mut cnf, &mut vm).unwrap();
        assert_eq!(tot.update(2, &mut cnf, &mut vm), Err(Error::NotIncremental));
    }

    #[test]
    fn incremental_update() {
        let mut tot: Totalizer = (0..6).map(|idx| lit![idx]).collect();
        tot = tot.with_mode(Mode::Incremental);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![6]);
        tot.build(1, &mut cnf, &mut vm).unwrap();
        assert_eq!(tot.outputs().len(), 6);
        assert_eq!(tot.enforce_ub(2), Err(Error::NotEncoded));
        let n_first = cnf.len();
        let n_vars = vm.n_used();
        tot.encode_ub_change(3, &mut cnf, &mut vm).unwrap();
        assert!(cnf.len() > n_first);
        assert_eq!(vm.n_used(), n_vars);
        assert_eq!(tot.enforce_ub(2), Ok(vec![!tot.outputs()[2]]));
        // no clauses are emitted twice
        let mut all: Vec<_> = cnf.iter().cloned().collect();
        all.sort_by_key(ToString::to_string);
        all.dedup();
        assert_eq!(all.len(), cnf.len());
        // same size as building for 3 directly
        let mut direct: Totalizer = (0..6).map(|idx| lit![idx]).collect();
        direct = direct.with_mode(Mode::Incremental);
        let mut cnf_direct = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![6]);
        direct.build(3, &mut cnf_direct, &mut vm).unwrap();
        assert_eq!(cnf_direct.len(), cnf.len());
    }

    #[test]
    fn join() {
        let mut tot: Totalizer = (0..3).map(|idx| lit![idx]).collect();
        tot = tot.with_mode(Mode::Incremental);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![6]);
        assert_eq!(
            tot.join(&[lit![3]], 1, &mut cnf, &mut vm),
            Err(Error::NotEncoded)
        );
        tot.build(1, &mut cnf, &mut vm).unwrap();
        let old_root_out = tot.outputs().to_vec();
        tot.join(&[lit![3], lit![4], lit![5]], 1, &mut cnf, &mut vm)
            .unwrap();
        assert_eq!(tot.n_lits(), 6);
        assert_eq!(tot.outputs().len(), 6);
        assert_ne!(tot.outputs(), &old_root_out[..]);
        assert_eq!(tot.enforce_ub(1), Ok(vec![!tot.outputs()[1]]));
    }

    #[test]
    fn single_lit() {
        let mut tot: Totalizer = [lit![0]].into_iter().collect();
        tot = tot.with_mode(Mode::Incremental);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![1]);
        tot.build(0, &mut cnf, &mut vm).unwrap();
        assert!(cnf.is_empty());
        assert_eq!(tot.enforce_ub(0), Ok(vec![!lit![0]]));
    }

    #[test]
    fn both_bounds() {
        let mut tot: Totalizer = (0..4).map(|idx| lit![idx]).collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        tot.encode_both(2, &mut cnf, &mut vm).unwrap();
        assert_eq!(tot.enforce_eq(2), Ok(vec![]));
        assert_eq!(tot.enforce_lb(5), Err(Error::Unsat));
    }
}
