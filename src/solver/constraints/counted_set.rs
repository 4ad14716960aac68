use std::collections::BTreeMap;

use crate::solver::{
    constraint::{ConstraintChecker, ConstraintDescriptor},
    problem::GroupScope,
};

/// Requires each target value to be taken by an exact number of members.
///
/// At `init` every member is restricted to the union of the target values.
/// During propagation, a value assigned to more members than its target
/// rejects the state; once a value reaches its target it is forbidden on
/// every member not already assigned to it. The covering variant also
/// rejects when too few members can still take a value to ever reach its
/// target.
#[derive(Debug, Clone)]
pub struct CountedSet {
    targets: BTreeMap<usize, usize>,
    covering: bool,
}

impl CountedSet {
    pub fn new(targets: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            covering: false,
        }
    }

    /// Counted set that must be achievable: as soon as fewer members can
    /// take a value than its target demands, the state is rejected.
    pub fn covering(targets: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            covering: true,
        }
    }
}

impl ConstraintChecker for CountedSet {
    fn init(&mut self, scope: &mut GroupScope<'_>) {
        for pos in 0..scope.len() {
            scope.restrict_to_set(pos, |value| self.targets.contains_key(&value));
        }
    }

    fn apply(&self, scope: &mut GroupScope<'_>, _dirty: &[usize]) -> bool {
        for (&value, &target) in &self.targets {
            let mut assigned = 0;
            let mut possible = 0;
            for pos in 0..scope.len() {
                if scope.possible(pos, value) {
                    possible += 1;
                }
                if scope.value(pos) == Some(value) {
                    assigned += 1;
                }
            }
            if assigned > target || (self.covering && possible < target) {
                return false;
            }
            if assigned == target {
                for pos in 0..scope.len() {
                    if scope.value(pos) != Some(value) {
                        scope.restrict(pos, value);
                    }
                }
            }
        }
        true
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "CountedSet".to_string(),
            description: format!(
                "value counts {:?}{}",
                self.targets,
                if self.covering { ", covering" } else { "" }
            ),
        }
    }
}
