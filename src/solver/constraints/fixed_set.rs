use std::collections::BTreeSet;

use crate::solver::{
    constraint::{ConstraintChecker, ConstraintDescriptor},
    problem::GroupScope,
};

/// Restricts every member of the group to a fixed set of allowed values.
///
/// All the work happens at `init`; there is nothing incremental to do
/// afterwards, so `apply` is a no-op.
#[derive(Debug, Clone)]
pub struct FixedSet {
    allowed: BTreeSet<usize>,
}

impl FixedSet {
    pub fn new(allowed: impl IntoIterator<Item = usize>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl ConstraintChecker for FixedSet {
    fn init(&mut self, scope: &mut GroupScope<'_>) {
        for pos in 0..scope.len() {
            scope.restrict_to_set(pos, |value| self.allowed.contains(&value));
        }
    }

    fn apply(&self, _scope: &mut GroupScope<'_>, _dirty: &[usize]) -> bool {
        true
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "FixedSet".to_string(),
            description: format!("members limited to {:?}", self.allowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::problem::Problem;

    #[test]
    fn members_are_restricted_at_attach_time() {
        let mut problem = Problem::new(2, 5);
        problem.add_group(&[0, 1], FixedSet::new([1, 3]));
        for id in 0..2 {
            assert_eq!(problem.count(id), 2);
            assert!(problem.possible(id, 1));
            assert!(problem.possible(id, 3));
        }
        // Decisions outside the group keep their full domain.
        let mut problem = Problem::new(2, 5);
        problem.add_group(&[0], FixedSet::new([4]));
        assert_eq!(problem.value(0), Some(4));
        assert_eq!(problem.count(1), 5);
    }

    #[test]
    fn empty_allowed_set_conflicts_immediately() {
        let mut problem = Problem::new(1, 3);
        problem.add_group(&[0], FixedSet::new(std::iter::empty()));
        assert!(!problem.propagate());
    }
}
