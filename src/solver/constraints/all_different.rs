use crate::solver::{
    constraint::{ConstraintChecker, ConstraintDescriptor},
    problem::GroupScope,
};

/// Requires every member of the group to take a distinct value.
///
/// Propagation waits for a member to become assigned and then removes
/// that value from every other member, the classic all-different scheme
/// used for sudoku rows, columns and boxes.
///
/// The covering variant additionally requires every value of the domain to
/// remain possible on at least one member (the group is then a
/// permutation of the value universe). The covering check is a
/// support-existence test only: it does not attempt full matching
/// feasibility, so some globally infeasible states are only rejected once
/// later assignments expose them.
#[derive(Debug, Clone, Default)]
pub struct AllDifferent {
    covering: bool,
    value_size: usize,
}

impl AllDifferent {
    pub fn new() -> Self {
        Self::default()
    }

    /// All-different with the surjectivity requirement: every value must
    /// be realized by some member. Requires exactly as many members as
    /// values.
    pub fn covering() -> Self {
        Self {
            covering: true,
            value_size: 0,
        }
    }
}

impl ConstraintChecker for AllDifferent {
    fn init(&mut self, scope: &mut GroupScope<'_>) {
        self.value_size = scope.value_size();
        if self.covering {
            debug_assert_eq!(
                scope.len(),
                self.value_size,
                "covering all-different needs one member per value"
            );
        }
    }

    fn apply(&self, scope: &mut GroupScope<'_>, dirty: &[usize]) -> bool {
        for &pos in dirty {
            if let Some(value) = scope.value(pos) {
                for other in 0..scope.len() {
                    if other != pos {
                        scope.restrict(other, value);
                    }
                }
            }
        }
        if self.covering {
            for value in 0..self.value_size {
                if !(0..scope.len()).any(|pos| scope.possible(pos, value)) {
                    return false;
                }
            }
        }
        true
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "AllDifferent".to_string(),
            description: if self.covering {
                "members take pairwise distinct values covering the domain".to_string()
            } else {
                "members take pairwise distinct values".to_string()
            },
        }
    }
}
