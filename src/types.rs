//! # Variables, Literals and Assignments
//!
//! The basic types every encoding is expressed in.

use std::{fmt, ops};

pub mod constraints;
pub use constraints::Clause;

/// The hash map used for internal lookup tables
#[cfg(feature = "fxhash")]
pub type RsHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fxhash"))]
pub type RsHashMap<K, V> = std::collections::HashMap<K, V>;

/// A boolean variable, identified by an index starting from 0. Since literals
/// pack the index and their sign into one `u32`, the largest index is
/// [`Var::MAX_IDX`].
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Var {
    idx: u32,
}

impl Var {
    /// The largest representable variable index
    pub const MAX_IDX: u32 = (u32::MAX - 1) / 2;

    /// Creates the variable with index `idx`
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32) -> Var {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Var { idx }
    }

    /// Gets the positive literal of the variable
    ///
    /// ```
    /// use satenc::{lit, var};
    ///
    /// assert_eq!(var![5].pos_lit(), lit![5]);
    /// ```
    #[inline]
    #[must_use]
    pub fn pos_lit(self) -> Lit {
        Lit::pack(self.idx, false)
    }

    /// Gets the negative literal of the variable
    #[inline]
    #[must_use]
    pub fn neg_lit(self) -> Lit {
        Lit::pack(self.idx, true)
    }

    /// The index as `usize`, for indexing into vectors
    #[inline]
    #[must_use]
    pub fn idx(self) -> usize {
        self.idx as usize
    }

    /// The index as stored
    #[inline]
    #[must_use]
    pub fn idx32(self) -> u32 {
        self.idx
    }
}

impl ops::Add<u32> for Var {
    type Output = Var;

    fn add(self, rhs: u32) -> Self::Output {
        Var::new(self.idx + rhs)
    }
}

impl ops::AddAssign<u32> for Var {
    fn add_assign(&mut self, rhs: u32) {
        *self = *self + rhs;
    }
}

impl ops::Sub<u32> for Var {
    type Output = Var;

    fn sub(self, rhs: u32) -> Self::Output {
        Var {
            idx: self.idx - rhs,
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.idx)
    }
}

/// Creates a [`Var`] from its index
///
/// ```
/// use satenc::{var, types::Var};
///
/// assert_eq!(var![42], Var::new(42));
/// ```
#[macro_export]
macro_rules! var {
    ($v:expr) => {
        $crate::types::Var::new($v)
    };
}

/// A variable or its negation. `!lit` negates.
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Lit {
    /// `2 * variable index`, plus one if negated
    packed: u32,
}

impl Lit {
    #[inline]
    fn pack(idx: u32, negated: bool) -> Lit {
        Lit {
            packed: (idx << 1) | u32::from(negated),
        }
    }

    /// Creates the literal of variable `idx` with the given sign
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32, negated: bool) -> Lit {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Lit::pack(idx, negated)
    }

    /// Creates the positive literal of variable `idx`
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[inline]
    #[must_use]
    pub fn positive(idx: u32) -> Lit {
        Lit::new(idx, false)
    }

    /// Creates the negative literal of variable `idx`
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[inline]
    #[must_use]
    pub fn negative(idx: u32) -> Lit {
        Lit::new(idx, true)
    }

    /// Creates a literal from the packed solver representation
    /// `2 * variable index + phase bit`, where an even value is positive.
    /// Every `u32` is a valid packed literal.
    #[inline]
    #[must_use]
    pub fn from_packed(packed: u32) -> Lit {
        Lit { packed }
    }

    /// Gets the packed solver representation `2 * variable index + phase bit`
    #[inline]
    #[must_use]
    pub fn to_packed(self) -> u32 {
        self.packed
    }

    /// Gets the index of the variable of the literal
    #[inline]
    #[must_use]
    pub fn vidx(self) -> usize {
        (self.packed >> 1) as usize
    }

    /// Gets the index of the variable of the literal as stored
    #[inline]
    #[must_use]
    pub fn vidx32(self) -> u32 {
        self.packed >> 1
    }

    /// Gets the variable of the literal
    ///
    /// ```
    /// use satenc::{lit, var};
    ///
    /// assert_eq!((!lit![5]).var(), var![5]);
    /// ```
    #[inline]
    #[must_use]
    pub fn var(self) -> Var {
        Var {
            idx: self.vidx32(),
        }
    }

    /// True if the literal is not negated
    #[inline]
    #[must_use]
    pub fn is_pos(self) -> bool {
        self.packed & 1 == 0
    }

    /// True if the literal is negated
    #[inline]
    #[must_use]
    pub fn is_neg(self) -> bool {
        self.packed & 1 == 1
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            packed: self.packed ^ 1,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neg() {
            write!(f, "~x{}", self.vidx())
        } else {
            write!(f, "x{}", self.vidx())
        }
    }
}

/// Creates the positive [`Lit`] of a variable index
///
/// ```
/// use satenc::{lit, types::Lit};
///
/// assert_eq!(lit![42], Lit::positive(42));
/// assert_eq!(!lit![42], Lit::negative(42));
/// ```
#[macro_export]
macro_rules! lit {
    ($l:expr) => {
        $crate::types::Lit::positive($l)
    };
}

/// Value of a variable, literal or clause under a partial assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TernaryVal {
    /// Assigned true
    True,
    /// Assigned false
    False,
    /// Not determined by the assignment
    #[default]
    DontCare,
}

impl ops::Not for TernaryVal {
    type Output = TernaryVal;

    fn not(self) -> Self::Output {
        match self {
            TernaryVal::True => TernaryVal::False,
            TernaryVal::False => TernaryVal::True,
            TernaryVal::DontCare => TernaryVal::DontCare,
        }
    }
}

impl From<bool> for TernaryVal {
    fn from(value: bool) -> Self {
        if value {
            TernaryVal::True
        } else {
            TernaryVal::False
        }
    }
}

/// A partial assignment of variables, indexed by variable
#[derive(Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    values: Vec<TernaryVal>,
}

impl Assignment {
    /// The value of a variable, [`TernaryVal::DontCare`] if it is unassigned
    #[must_use]
    pub fn var_value(&self, var: Var) -> TernaryVal {
        self.values
            .get(var.idx())
            .copied()
            .unwrap_or(TernaryVal::DontCare)
    }

    /// The value of a literal, [`TernaryVal::DontCare`] if its variable is
    /// unassigned
    #[must_use]
    pub fn lit_value(&self, lit: Lit) -> TernaryVal {
        let val = self.var_value(lit.var());
        if lit.is_neg() {
            !val
        } else {
            val
        }
    }

    /// Sets `lit` to true
    pub fn assign_lit(&mut self, lit: Lit) {
        let idx = lit.vidx();
        if self.values.len() <= idx {
            self.values.resize(idx + 1, TernaryVal::DontCare);
        }
        self.values[idx] = TernaryVal::from(lit.is_pos());
    }

    /// Evaluates a clause. The clause is [`TernaryVal::DontCare`] if no
    /// literal is true but some are unassigned.
    #[must_use]
    pub fn evaluate_clause(&self, clause: &Clause) -> TernaryVal {
        let mut val = TernaryVal::False;
        for &lit in clause {
            match self.lit_value(lit) {
                TernaryVal::True => return TernaryVal::True,
                TernaryVal::DontCare => val = TernaryVal::DontCare,
                TernaryVal::False => (),
            }
        }
        val
    }
}

impl FromIterator<Lit> for Assignment {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        let mut assignment = Assignment::default();
        iter.into_iter().for_each(|l| assignment.assign_lit(l));
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::{Assignment, Lit, TernaryVal, Var};
    use crate::{clause, lit, var};

    #[test]
    fn lit_packing() {
        let lit = Lit::negative(5);
        assert_eq!(lit.packed, 0b1011);
        assert_eq!(lit.vidx(), 5);
        assert!(lit.is_neg());
        assert_eq!(lit.var(), var![5]);
    }

    #[test]
    fn packed_round_trip() {
        assert_eq!(Lit::from_packed(14), lit![7]);
        assert_eq!(Lit::from_packed(15), !lit![7]);
        assert_eq!((!lit![7]).to_packed(), 15);
        assert_eq!(Lit::from_packed(u32::MAX).var(), var![Var::MAX_IDX]);
    }

    #[test]
    fn negation() {
        let lit = lit![3];
        assert_eq!(!lit, Lit::negative(3));
        assert_eq!(!!lit, lit);
        assert_eq!(var![3].neg_lit(), !lit);
    }

    #[test]
    fn var_arithmetic() {
        let mut var = var![4];
        var += 2;
        assert_eq!(var, var![6]);
        assert_eq!(var - 6, var![0]);
        assert_eq!(var.idx(), 6);
    }

    #[test]
    #[should_panic(expected = "variable index too high")]
    fn var_too_high() {
        let _ = Var::new(Var::MAX_IDX + 1);
    }

    #[test]
    fn assignment_eval() {
        let assign: Assignment = [lit![0], !lit![1]].into_iter().collect();
        assert_eq!(assign.lit_value(!lit![1]), TernaryVal::True);
        assert_eq!(assign.lit_value(lit![2]), TernaryVal::DontCare);
        assert_eq!(
            assign.evaluate_clause(&clause![lit![1], lit![2]]),
            TernaryVal::DontCare
        );
        assert_eq!(
            assign.evaluate_clause(&clause![lit![1], !lit![0]]),
            TernaryVal::False
        );
        assert_eq!(
            assign.evaluate_clause(&clause![lit![1], lit![0]]),
            TernaryVal::True
        );
    }
}
