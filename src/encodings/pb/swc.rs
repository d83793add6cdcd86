//! # Sequential Weight Counter Encoding
//!
//! Encoding of `weighted sum of lits <= rhs` through a table of unary partial
//! sums \[1\]. Row `i` of the table holds the partial sum over the first `i + 1`
//! items, where column `j` is true if that sum is at least `j + 1`.
//!
//! The encoding is incremental as extended in \[2\]. In [`Mode::Incremental`]
//! the clauses forbidding a sum above the bound contain a blocking literal.
//! Changing the bound permanently satisfies the clauses of the previous bound
//! by asserting its blocking literal and encodes the new bound under a fresh
//! one.
//!
//! ## References
//!
//! - \[1\] Steffen Hölldobler and Norbert Manthey and Peter Steinke: _A Compact Encoding of Pseudo-Boolean Constraints into SAT_, KI 2012.
//! - \[2\] Ruben Martins and Saurabh Joshi and Vasco Manquinho and Ines Lynce: _Incremental Cardinality Constraints for MaxSAT_, CP 2014.

use std::mem;

use super::{BoundUpper, BoundUpperIncremental, Encode};
use crate::{
    clause,
    encodings::{CollectClauses, EncodeStats, Error, IterWeightedInputs, Mode},
    instances::ManageVars,
    types::{Clause, Lit},
};

/// An item in the counter table
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Row {
    lit: Lit,
    weight: usize,
    /// `seq[j]` is true if the partial sum up to this row is at least `j + 1`
    seq: Vec<Lit>,
}

/// Implementation of the sequential weight counter encoding \[1\], incremental
/// as extended in \[2\].
///
/// Items with a weight larger than the bound do not enter the table. In
/// [`Mode::Static`] they are set to false by unit clauses, in
/// [`Mode::Incremental`] they are kept as unit literals that are blocked for
/// the current bound and enter the table once the bound allows them.
///
/// In [`Mode::Static`], a bound of at least the sum of all weights emits
/// nothing. The table is only built once a later bound, or joined literals,
/// make the constraint non-trivial.
///
/// # References
///
/// - \[1\] Steffen Hölldobler and Norbert Manthey and Peter Steinke: _A Compact Encoding of Pseudo-Boolean Constraints into SAT_, KI 2012.
/// - \[2\] Ruben Martins and Saurabh Joshi and Vasco Manquinho and Ines Lynce: _Incremental Cardinality Constraints for MaxSAT_, CP 2014.
#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequentialWeightCounter {
    /// Input literals and weights
    in_lits: Vec<(Lit, usize)>,
    /// The counter table
    rows: Vec<Row>,
    /// Items outside of the table because their weight exceeds the bound
    unit_lits: Vec<(Lit, usize)>,
    /// The number of columns of the table
    width: usize,
    /// The current bound
    rhs: Option<usize>,
    /// Whether the counter table is built
    built: bool,
    /// The blocking literal of the current bound, in incremental mode
    blocking: Option<Lit>,
    /// Static or incremental
    mode: Mode,
    /// The number of clauses in the encoding
    n_clauses: usize,
    /// The number of new variables in the encoding
    n_vars: u32,
}

impl SequentialWeightCounter {
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

    /// Gets the items that are not in the counter table because their weight
    /// exceeds the bound
    #[must_use]
    pub fn unit_lits(&self) -> &[(Lit, usize)] {
        &self.unit_lits
    }

    /// Gets the blocking literal of the current bound. Only exists in
    /// incremental mode if the bound needs any clauses.
    #[must_use]
    pub fn blocking_lit(&self) -> Option<Lit> {
        self.blocking
    }

    /// Builds the encoding for `weighted sum of lits <= rhs`. If the encoding
    /// was already built, a static encoding tightens its bound and an
    /// incremental one changes it through [`SequentialWeightCounter::update_inc`].
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroWeight`] if an input literal has weight zero
    /// - [`Error::RhsTooLarge`] if `rhs` is `usize::MAX`
    /// - [`Error::NotIncremental`] if a static encoding would need to relax
    ///   its bound
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    #[tracing::instrument(level = "debug", name = "swc_encode", skip_all, fields(n_lits = self.in_lits.len(), rhs = rhs))]
    pub fn encode<Col>(
        &mut self,
        rhs: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        if rhs == usize::MAX {
            return Err(Error::RhsTooLarge(rhs));
        }
        if let Some(old) = self.rhs {
            let trivial = old >= self.weight_sum();
            return match self.mode {
                Mode::Incremental => self.update_inc(rhs, collector, var_manager),
                Mode::Static if rhs > old && !trivial => Err(Error::NotIncremental),
                Mode::Static if rhs >= old => {
                    self.rhs = Some(rhs);
                    Ok(())
                }
                Mode::Static if !self.built => self.build_table(rhs, collector, var_manager),
                Mode::Static => {
                    let prev = (collector.n_clauses(), var_manager.n_used());
                    let clauses = self.exceeds_clauses(rhs, 0, self.unit_lits.len());
                    collector.extend_clauses(clauses)?;
                    self.rhs = Some(rhs);
                    self.record(collector, var_manager, prev);
                    Ok(())
                }
            };
        }
        if self.in_lits.iter().any(|&(_, weight)| weight == 0) {
            return Err(Error::ZeroWeight);
        }
        self.build_table(rhs, collector, var_manager)
    }

    /// Builds the counter table for `rhs` over all input literals. In static
    /// mode nothing is built while `rhs` is at least the sum of weights.
    fn build_table<Col>(
        &mut self,
        rhs: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.rhs = Some(rhs);
        if self.mode == Mode::Static && rhs >= self.weight_sum() {
            tracing::debug!(weight_sum = self.weight_sum(), "trivial bound");
            return Ok(());
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        self.width = rhs;
        self.built = true;
        let items = self.in_lits.clone();
        let clauses = self.add_items(&items, var_manager);
        collector.extend_clauses(clauses)?;
        let clauses = self.exceeds_clauses(rhs, 0, 0);
        self.emit_level(clauses, collector, var_manager)?;
        self.record(collector, var_manager, prev);
        tracing::debug!(
            n_rows = self.rows.len(),
            n_units = self.unit_lits.len(),
            "encoded sequential weight counter"
        );
        Ok(())
    }

    /// Changes the bound of an incremental encoding to `rhs`. The blocking
    /// literal of the previous bound is asserted, the table is extended if
    /// `rhs` is larger than any previous bound and unit literals that now fit
    /// the bound enter the table. The new bound is encoded under a fresh
    /// blocking literal.
    ///
    /// # Errors
    ///
    /// - [`Error::NotIncremental`] if the encoding is in static mode
    /// - [`Error::NotEncoded`] if [`SequentialWeightCounter::encode`] was not
    ///   called before
    /// - [`Error::RhsTooLarge`] if `rhs` is `usize::MAX`
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    #[tracing::instrument(level = "debug", name = "swc_update_inc", skip_all, fields(n_lits = self.in_lits.len(), rhs = rhs))]
    pub fn update_inc<Col>(
        &mut self,
        rhs: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        if self.mode != Mode::Incremental {
            return Err(Error::NotIncremental);
        }
        let Some(old) = self.rhs else {
            return Err(Error::NotEncoded);
        };
        if rhs == usize::MAX {
            return Err(Error::RhsTooLarge(rhs));
        }
        if rhs == old {
            return Ok(());
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        if let Some(blocking) = self.blocking.take() {
            collector.add_clause(clause![blocking])?;
        }
        if rhs > self.width {
            let clauses = self.extend_columns(rhs, var_manager);
            collector.extend_clauses(clauses)?;
        }
        let (fitting, heavy): (Vec<_>, Vec<_>) = mem::take(&mut self.unit_lits)
            .into_iter()
            .partition(|&(_, weight)| weight <= rhs);
        self.unit_lits = heavy;
        self.rhs = Some(rhs);
        let clauses = self.add_items(&fitting, var_manager);
        collector.extend_clauses(clauses)?;
        let clauses = self.exceeds_clauses(rhs, 0, 0);
        self.emit_level(clauses, collector, var_manager)?;
        self.record(collector, var_manager, prev);
        tracing::debug!(
            n_rows = self.rows.len(),
            width = self.width,
            n_units = self.unit_lits.len(),
            "updated sequential weight counter"
        );
        Ok(())
    }

    /// Joins weighted literals into the encoding. The new items are appended
    /// as table rows for the current bound and blocking literal.
    ///
    /// # Errors
    ///
    /// - [`Error::NotEncoded`] if [`SequentialWeightCounter::encode`] was not
    ///   called before
    /// - [`Error::ZeroWeight`] if a joined literal has weight zero
    /// - [`Error::OutOfMemory`] if the clause collector runs out of memory
    #[tracing::instrument(level = "debug", name = "swc_join", skip_all, fields(n_lits = self.in_lits.len(), n_joined = lits.len()))]
    pub fn join<Col>(
        &mut self,
        lits: &[(Lit, usize)],
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        let Some(rhs) = self.rhs else {
            return Err(Error::NotEncoded);
        };
        if lits.iter().any(|&(_, weight)| weight == 0) {
            return Err(Error::ZeroWeight);
        }
        if !self.built {
            self.in_lits.extend_from_slice(lits);
            return self.build_table(rhs, collector, var_manager);
        }
        let prev = (collector.n_clauses(), var_manager.n_used());
        self.in_lits.extend_from_slice(lits);
        let (rows_from, units_from) = (self.rows.len(), self.unit_lits.len());
        let clauses = self.add_items(lits, var_manager);
        collector.extend_clauses(clauses)?;
        let clauses = self.exceeds_clauses(rhs, rows_from, units_from);
        self.emit_level(clauses, collector, var_manager)?;
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

    /// Adds items to the table if they fit the current bound. Items that do
    /// not fit are set to false in static mode and become unit literals in
    /// incremental mode.
    fn add_items(&mut self, items: &[(Lit, usize)], var_manager: &mut dyn ManageVars) -> Vec<Clause> {
        let rhs = self.rhs.expect("bound is set before adding items");
        let mut clauses = vec![];
        for &(lit, weight) in items {
            if weight <= rhs {
                clauses.extend(self.push_row(lit, weight, var_manager));
            } else if self.mode == Mode::Static {
                clauses.push(clause![!lit]);
            } else {
                self.unit_lits.push((lit, weight));
            }
        }
        clauses
    }

    /// Appends a table row for an item, returning the clauses propagating
    /// the previous partial sum, forcing the item's weight and adding the
    /// weight to the previous partial sum
    fn push_row(&mut self, lit: Lit, weight: usize, var_manager: &mut dyn ManageVars) -> Vec<Clause> {
        debug_assert!(weight <= self.width);
        let seq: Vec<Lit> = (0..self.width).map(|_| var_manager.new_lit()).collect();
        let mut clauses = vec![];
        let prev = self.rows.last().map(|row| &row.seq);
        for j in 0..self.width {
            if let Some(prev) = prev {
                clauses.push(clause![!prev[j], seq[j]]);
            }
            if j < weight {
                clauses.push(clause![!lit, seq[j]]);
            }
            if let Some(prev) = prev {
                if j + weight < self.width {
                    clauses.push(clause![!prev[j], !lit, seq[j + weight]]);
                }
            }
        }
        self.rows.push(Row { lit, weight, seq });
        clauses
    }

    /// Extends all rows to `width` columns, returning the clauses for the
    /// new columns
    fn extend_columns(&mut self, width: usize, var_manager: &mut dyn ManageVars) -> Vec<Clause> {
        debug_assert!(width > self.width);
        let old_width = self.width;
        let mut clauses = vec![];
        for idx in 0..self.rows.len() {
            self.rows[idx]
                .seq
                .extend((old_width..width).map(|_| var_manager.new_lit()));
            let (before, after) = self.rows.split_at(idx);
            let row = &after[0];
            let prev = before.last().map(|row| &row.seq);
            for j in old_width..width {
                if let Some(prev) = prev {
                    clauses.push(clause![!prev[j], row.seq[j]]);
                }
                if j < row.weight {
                    clauses.push(clause![!row.lit, row.seq[j]]);
                }
            }
            if let Some(prev) = prev {
                // carries with targets in the new columns
                for j in old_width - row.weight..width - row.weight {
                    clauses.push(clause![!prev[j], !row.lit, row.seq[j + row.weight]]);
                }
            }
        }
        self.width = width;
        tracing::trace!(old_width = old_width, width = width, n_clauses = clauses.len(), "extended columns");
        clauses
    }

    /// Clauses forbidding a weighted sum above `rhs` for rows starting at
    /// `rows_from` and unit literals starting at `units_from`
    fn exceeds_clauses(&self, rhs: usize, rows_from: usize, units_from: usize) -> Vec<Clause> {
        debug_assert!(rhs <= self.width);
        let mut clauses = vec![];
        for idx in rows_from..self.rows.len() {
            let row = &self.rows[idx];
            if row.weight > rhs {
                clauses.push(clause![!row.lit]);
            } else if idx > 0 {
                clauses.push(clause![!self.rows[idx - 1].seq[rhs - row.weight], !row.lit]);
            }
        }
        if self.mode == Mode::Incremental {
            clauses.extend(self.unit_lits[units_from..].iter().map(|&(lit, _)| clause![!lit]));
        }
        clauses
    }

    /// Emits the clauses of a bound, in incremental mode under the blocking
    /// literal of the bound
    fn emit_level<Col>(
        &mut self,
        mut clauses: Vec<Clause>,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        if self.mode == Mode::Incremental && !clauses.is_empty() {
            let blocking = *self.blocking.get_or_insert_with(|| var_manager.new_lit());
            clauses.iter_mut().for_each(|cl| cl.add(blocking));
        }
        collector.extend_clauses(clauses)?;
        Ok(())
    }
}

impl Encode for SequentialWeightCounter {
    fn weight_sum(&self) -> usize {
        self.in_lits
            .iter()
            .fold(0, |sum, &(_, weight)| sum.saturating_add(weight))
    }
}

impl BoundUpper for SequentialWeightCounter {
    fn encode_ub<Col>(
        &mut self,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.encode(ub, collector, var_manager)
    }

    fn enforce_ub(&self, ub: usize) -> Result<Vec<Lit>, Error> {
        if ub >= self.weight_sum() {
            return Ok(vec![]);
        }
        let Some(rhs) = self.rhs else {
            return Err(Error::NotEncoded);
        };
        match self.mode {
            Mode::Static if ub >= rhs => Ok(vec![]),
            Mode::Incremental if ub == rhs => {
                Ok(self.blocking.map(|blocking| vec![!blocking]).unwrap_or_default())
            }
            _ => Err(Error::NotEncoded),
        }
    }
}

impl BoundUpperIncremental for SequentialWeightCounter {
    fn encode_ub_change<Col>(
        &mut self,
        ub: usize,
        collector: &mut Col,
        var_manager: &mut dyn ManageVars,
    ) -> Result<(), Error>
    where
        Col: CollectClauses,
    {
        self.update_inc(ub, collector, var_manager)
    }
}

impl EncodeStats for SequentialWeightCounter {
    fn n_clauses(&self) -> usize {
        self.n_clauses
    }

    fn n_vars(&self) -> u32 {
        self.n_vars
    }
}

impl IterWeightedInputs for SequentialWeightCounter {
    type Iter<'a> = std::iter::Copied<std::slice::Iter<'a, (Lit, usize)>>;

    fn iter(&self) -> Self::Iter<'_> {
        self.in_lits.iter().copied()
    }
}

impl From<Vec<(Lit, usize)>> for SequentialWeightCounter {
    fn from(lits: Vec<(Lit, usize)>) -> Self {
        Self {
            in_lits: lits,
            ..Default::default()
        }
    }
}

impl FromIterator<(Lit, usize)> for SequentialWeightCounter {
    fn from_iter<T: IntoIterator<Item = (Lit, usize)>>(iter: T) -> Self {
        Self::from(Vec::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::SequentialWeightCounter;
    use crate::{
        clause,
        encodings::{
            pb::{BoundUpper, BoundUpperIncremental, Encode},
            EncodeStats, Error, Mode,
        },
        instances::{BasicVarManager, Cnf, ManageVars},
        lit, var,
    };

    #[test]
    fn basic() {
        let mut swc: SequentialWeightCounter =
            [(lit![0], 1), (lit![1], 2), (lit![2], 1)].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        swc.encode(2, &mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 3 + 3 * 2);
        // row 0: 1 weight clause
        // row 1: 2 propagate, 2 weight, 0 carries, 1 exceeds
        // row 2: 2 propagate, 1 weight, 1 carry, 1 exceeds
        assert_eq!(cnf.len(), 1 + 5 + 5);
        assert_eq!(cnf[0], clause![!lit![0], lit![3]]);
        assert_eq!(swc.n_clauses(), cnf.len());
        assert_eq!(swc.n_vars(), 6);
        assert_eq!(swc.weight_sum(), 4);
    }

    #[test]
    fn heavy_static() {
        let mut swc: SequentialWeightCounter = [(lit![0], 3), (lit![1], 1)].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![2]);
        swc.encode(2, &mut cnf, &mut vm).unwrap();
        assert!(cnf.iter().any(|cl| *cl == clause![!lit![0]]));
        assert!(swc.unit_lits().is_empty());
        assert_eq!(swc.enforce_ub(2), Ok(vec![]));
    }

    #[test]
    fn heavy_incremental() {
        let mut swc: SequentialWeightCounter = [(lit![0], 3), (lit![1], 1)].into_iter().collect();
        swc = swc.with_mode(Mode::Incremental);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![2]);
        swc.encode(2, &mut cnf, &mut vm).unwrap();
        assert_eq!(swc.unit_lits(), &[(lit![0], 3)]);
        let blocking = swc.blocking_lit().unwrap();
        assert!(cnf.iter().any(|cl| *cl == clause![!lit![0], blocking]));
        assert_eq!(swc.enforce_ub(2), Ok(vec![!blocking]));
        swc.update_inc(3, &mut cnf, &mut vm).unwrap();
        assert!(swc.unit_lits().is_empty());
        assert!(cnf.iter().any(|cl| *cl == clause![blocking]));
        assert_ne!(swc.blocking_lit(), Some(blocking));
    }

    #[test]
    fn rhs_too_large() {
        let mut swc: SequentialWeightCounter = [(lit![0], 3), (lit![1], 1)].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![2]);
        assert_eq!(
            swc.encode(usize::MAX, &mut cnf, &mut vm),
            Err(Error::RhsTooLarge(usize::MAX))
        );
        assert!(cnf.is_empty());
    }

    #[test]
    fn zero_weight() {
        let mut swc: SequentialWeightCounter = [(lit![0], 0), (lit![1], 1)].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![2]);
        assert_eq!(swc.encode(1, &mut cnf, &mut vm), Err(Error::ZeroWeight));
    }

    #[test]
    fn not_incremental() {
        let mut swc: SequentialWeightCounter =
            [(lit![0], 1), (lit![1], 2), (lit![2], 1)].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        swc.encode(2, &mut cnf, &mut vm).unwrap();
        assert_eq!(
            swc.update_inc(3, &mut cnf, &mut vm),
            Err(Error::NotIncremental)
        );
        assert_eq!(swc.encode(3, &mut cnf, &mut vm), Err(Error::NotIncremental));
        let n_clauses = cnf.len();
        swc.encode(1, &mut cnf, &mut vm).unwrap();
        assert!(cnf.len() > n_clauses);
        let mut inc: SequentialWeightCounter = [(lit![0], 1)].into_iter().collect();
        inc = inc.with_mode(Mode::Incremental);
        assert_eq!(inc.update_inc(1, &mut cnf, &mut vm), Err(Error::NotEncoded));
    }

    #[test]
    fn incremental_update() {
        let items = [(lit![0], 2), (lit![1], 3), (lit![2], 1), (lit![3], 2)];
        let mut swc: SequentialWeightCounter = items.into_iter().collect();
        swc = swc.with_mode(Mode::Incremental);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        swc.encode(2, &mut cnf, &mut vm).unwrap();
        let first: Vec<_> = cnf.iter().cloned().collect();
        let mut update = Cnf::new();
        swc.encode_ub_change(4, &mut update, &mut vm).unwrap();
        assert!(update.iter().all(|cl| !first.contains(cl)));
        assert!(swc.unit_lits().is_empty());
        assert_eq!(swc.enforce_ub(4).unwrap().len(), 1);
        assert_eq!(swc.enforce_ub(2), Err(Error::NotEncoded));
        assert_eq!(swc.enforce_ub(8), Ok(vec![]));
    }

    #[test]
    fn trivial_static() {
        let mut swc: SequentialWeightCounter = (0..4).map(|idx| (lit![idx], 1)).collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        swc.encode(1000, &mut cnf, &mut vm).unwrap();
        assert!(cnf.is_empty());
        assert_eq!(vm.n_used(), 4);
        assert_eq!(swc.enforce_ub(1000), Ok(vec![]));
        // relaxing a trivial bound stays trivial
        swc.encode(2000, &mut cnf, &mut vm).unwrap();
        swc.encode(4, &mut cnf, &mut vm).unwrap();
        assert!(cnf.is_empty());
        assert_eq!(swc.n_clauses(), 0);
        // the first real bound builds the table
        swc.encode(2, &mut cnf, &mut vm).unwrap();
        assert_eq!(vm.n_used(), 4 + 4 * 2);
        assert_eq!(swc.n_clauses(), cnf.len());
        assert_eq!(swc.encode(3, &mut cnf, &mut vm), Err(Error::NotIncremental));
    }

    #[test]
    fn trivial_static_join() {
        let mut swc: SequentialWeightCounter = [(lit![0], 2), (lit![1], 1)].into_iter().collect();
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![3]);
        swc.encode(3, &mut cnf, &mut vm).unwrap();
        assert!(cnf.is_empty());
        swc.join(&[(lit![2], 2)], &mut cnf, &mut vm).unwrap();
        assert!(!cnf.is_empty());
        assert_eq!(vm.n_used(), 3 + 3 * 3);
    }

    #[test]
    fn weight_sum_saturates() {
        let swc: SequentialWeightCounter =
            [(lit![0], usize::MAX - 1), (lit![1], 5)].into_iter().collect();
        assert_eq!(swc.weight_sum(), usize::MAX);
        assert_eq!(swc.enforce_ub(3), Err(Error::NotEncoded));
    }

    #[test]
    fn join() {
        let mut swc: SequentialWeightCounter = [(lit![0], 1), (lit![1], 2)].into_iter().collect();
        swc = swc.with_mode(Mode::Incremental);
        let mut cnf = Cnf::new();
        let mut vm = BasicVarManager::from_next_free(var![4]);
        assert_eq!(
            swc.join(&[(lit![2], 1)], &mut cnf, &mut vm),
            Err(Error::NotEncoded)
        );
        swc.encode(2, &mut cnf, &mut vm).unwrap();
        let blocking = swc.blocking_lit();
        swc.join(&[(lit![2], 1), (lit![3], 5)], &mut cnf, &mut vm)
            .unwrap();
        assert_eq!(swc.blocking_lit(), blocking);
        assert_eq!(swc.weight_sum(), 9);
        assert_eq!(swc.unit_lits(), &[(lit![3], 5)]);
    }
}
