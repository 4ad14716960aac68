use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::solver::{
    constraint::{Checker, ConstraintChecker, ConstraintDescriptor},
    decider::Decider,
    domain::ValueSet,
    stats::SearchStats,
    tracker::{DecisionTracker, SolutionTracker},
    work_list::WorkList,
};

/// Index of a decision in its problem's arena.
pub type DecisionId = usize;
/// Index of a group in its problem's arena.
pub type GroupId = usize;

/// One variable of the problem: a grid square, a line segment, a letter
/// slot. Holds the set of values it can still take, and remembers which
/// groups it participates in so the propagation loop knows what to
/// re-check when the set shrinks.
#[derive(Debug)]
struct Decision {
    possibilities: ValueSet,
    groups: Vec<GroupId>,
}

/// An ordered set of decisions bound to one constraint. Membership is
/// fixed at construction; order matters to positional constraints such as
/// dictionary words and run lengths.
#[derive(Debug)]
struct Group {
    members: Vec<DecisionId>,
    positions: HashMap<DecisionId, usize>,
    checker: Checker,
}

/// The mutable search state, split out of [`Problem`] so checkers can
/// borrow it through a [`GroupScope`] while the group list stays borrowed
/// by the propagation loop.
#[derive(Debug)]
struct Store {
    value_size: usize,
    decisions: Vec<Decision>,
    dirty: WorkList,
    undo_stack: Vec<Vec<(DecisionId, usize)>>,
    conflict: bool,
}

impl Store {
    /// Removes `value` as a possibility for `id`. The removal is journaled
    /// into the open undo frame (if any), queues the decision dirty, and
    /// raises the conflict flag if the domain just emptied.
    fn restrict(&mut self, id: DecisionId, value: usize) {
        if !self.decisions[id].possibilities.remove(value) {
            return;
        }
        if let Some(frame) = self.undo_stack.last_mut() {
            frame.push((id, value));
        }
        self.dirty.push(id);
        if self.decisions[id].possibilities.is_empty() {
            self.conflict = true;
        }
    }

    /// Removes everything but `value` as a possibility for `id`.
    fn restrict_to(&mut self, id: DecisionId, value: usize) {
        for v in 0..self.value_size {
            if v != value {
                self.restrict(id, v);
            }
        }
    }

    /// Removes every possibility of `id` that `keep` rejects.
    fn restrict_to_set(&mut self, id: DecisionId, keep: impl Fn(usize) -> bool) {
        for v in 0..self.value_size {
            if !keep(v) {
                self.restrict(id, v);
            }
        }
    }

    /// Removes every possibility of `id` that `other` has already lost.
    fn restrict_to_equal(&mut self, id: DecisionId, other: DecisionId) {
        for v in 0..self.value_size {
            if !self.decisions[other].possibilities.contains(v) {
                self.restrict(id, v);
            }
        }
    }

    fn snapshot(&mut self) {
        self.undo_stack.push(Vec::new());
    }

    /// Pops the top undo frame and reinstates exactly the values removed
    /// since the matching snapshot.
    fn undo(&mut self) {
        let frame = self.undo_stack.pop().expect("undo without snapshot");
        for (id, value) in frame {
            self.decisions[id].possibilities.insert(value);
        }
    }
}

/// A checker's window onto its group: the members in group order, with
/// read and restrict operations addressed by position.
pub struct GroupScope<'a> {
    store: &'a mut Store,
    members: &'a [DecisionId],
}

impl GroupScope<'_> {
    /// Number of members in the group.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Size of the shared value universe.
    pub fn value_size(&self) -> usize {
        self.store.value_size
    }

    /// The assigned value of the member at `pos`, or `None` while more
    /// than one possibility remains.
    pub fn value(&self, pos: usize) -> Option<usize> {
        self.store.decisions[self.members[pos]].possibilities.singleton()
    }

    /// Number of remaining possibilities for the member at `pos`.
    pub fn count(&self, pos: usize) -> usize {
        self.store.decisions[self.members[pos]].possibilities.len()
    }

    pub fn possible(&self, pos: usize, value: usize) -> bool {
        self.store.decisions[self.members[pos]].possibilities.contains(value)
    }

    pub fn restrict(&mut self, pos: usize, value: usize) {
        self.store.restrict(self.members[pos], value);
    }

    pub fn restrict_to(&mut self, pos: usize, value: usize) {
        self.store.restrict_to(self.members[pos], value);
    }

    pub fn restrict_to_set(&mut self, pos: usize, keep: impl Fn(usize) -> bool) {
        self.store.restrict_to_set(self.members[pos], keep);
    }

    /// Restricts the member at `pos` to values still possible for the
    /// member at `source`.
    pub fn restrict_to_equal(&mut self, pos: usize, source: usize) {
        self.store
            .restrict_to_equal(self.members[pos], self.members[source]);
    }
}

/// Strategy hooks threaded through a solve.
///
/// The decider is mandatory; the trackers are optional observers. All
/// three are caller-owned mutable borrows, so their accumulated state
/// (counters, captured solutions) remains inspectable after
/// [`Problem::solve`] returns.
pub struct Settings<'a> {
    pub decider: &'a mut dyn Decider,
    pub decision_tracker: Option<&'a mut dyn DecisionTracker>,
    pub solution_tracker: Option<&'a mut dyn SolutionTracker>,
}

impl<'a> Settings<'a> {
    pub fn new(decider: &'a mut dyn Decider) -> Self {
        Self {
            decider,
            decision_tracker: None,
            solution_tracker: None,
        }
    }

    pub fn with_decision_tracker(mut self, tracker: &'a mut dyn DecisionTracker) -> Self {
        self.decision_tracker = Some(tracker);
        self
    }

    pub fn with_solution_tracker(mut self, tracker: &'a mut dyn SolutionTracker) -> Self {
        self.solution_tracker = Some(tracker);
        self
    }
}

/// A constraint satisfaction problem: the decision and group arenas plus
/// the ephemeral state used while solving it.
///
/// Build one with [`Problem::new`], attach constraints over index sets
/// with [`Problem::add_group`], optionally pin initial values with
/// [`Problem::set`], then call [`Problem::solve`]. On success the final
/// assignment is readable through [`Problem::value`]; on failure every
/// branch assignment has been unwound and only restrictions that hold in
/// every branch (initial propagation) remain.
#[derive(Debug)]
pub struct Problem {
    store: Store,
    groups: Vec<Group>,
    stats: SearchStats,
}

impl Problem {
    /// Creates a problem with `size` decisions, each initially allowed
    /// every value in `0..value_size`.
    pub fn new(size: usize, value_size: usize) -> Self {
        Self {
            store: Store {
                value_size,
                decisions: (0..size)
                    .map(|_| Decision {
                        possibilities: ValueSet::full(value_size),
                        groups: Vec::new(),
                    })
                    .collect(),
                dirty: WorkList::new(size),
                undo_stack: Vec::new(),
                conflict: false,
            },
            groups: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Number of decisions.
    pub fn size(&self) -> usize {
        self.store.decisions.len()
    }

    /// Size of the shared value universe.
    pub fn value_size(&self) -> usize {
        self.store.value_size
    }

    /// The assigned value of decision `id`, or `None` while more than one
    /// possibility remains.
    pub fn value(&self, id: DecisionId) -> Option<usize> {
        self.store.decisions[id].possibilities.singleton()
    }

    /// Number of remaining possibilities for decision `id`.
    pub fn count(&self, id: DecisionId) -> usize {
        self.store.decisions[id].possibilities.len()
    }

    pub fn possible(&self, id: DecisionId, value: usize) -> bool {
        self.store.decisions[id].possibilities.contains(value)
    }

    /// The current assignment, one entry per decision.
    pub fn assignment(&self) -> Vec<Option<usize>> {
        (0..self.size()).map(|id| self.value(id)).collect()
    }

    /// Pins decision `id` to `value`. Used for the initial configuration,
    /// for example the givens of a sudoku.
    pub fn set(&mut self, id: DecisionId, value: usize) {
        self.store.restrict_to(id, value);
    }

    /// Removes `value` as a possibility for decision `id`.
    pub fn restrict(&mut self, id: DecisionId, value: usize) {
        self.store.restrict(id, value);
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The ordered members of group `gid`.
    pub fn group_members(&self, gid: GroupId) -> &[DecisionId] {
        &self.groups[gid].members
    }

    pub fn group_descriptor(&self, gid: GroupId) -> ConstraintDescriptor {
        self.groups[gid].checker.descriptor()
    }

    /// Counters from the most recent [`Problem::solve`] call.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Binds `checker` to the decisions listed in `members` (in that
    /// order) and runs its one-time `init`.
    pub fn add_group(&mut self, members: &[DecisionId], checker: impl Into<Checker>) {
        let mut checker = checker.into();
        let members = members.to_vec();
        let gid = self.groups.len();
        for &id in &members {
            self.store.decisions[id].groups.push(gid);
        }
        let positions = members
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, pos))
            .collect();
        checker.init(&mut GroupScope {
            store: &mut self.store,
            members: &members,
        });
        self.groups.push(Group {
            members,
            positions,
            checker,
        });
        self.stats.groups.push(Default::default());
    }

    /// Attempts to solve the problem, returning `true` if a solution was
    /// found. The search stops at the first solution; it does not
    /// enumerate alternatives.
    pub fn solve(&mut self, settings: &mut Settings<'_>) -> bool {
        self.stats.reset(self.groups.len());
        if !self.propagate() {
            return false;
        }
        self.solve_rec(settings)
    }

    fn solve_rec(&mut self, settings: &mut Settings<'_>) -> bool {
        let unassigned: Vec<DecisionId> = (0..self.size())
            .filter(|&id| self.store.decisions[id].possibilities.singleton().is_none())
            .collect();
        if unassigned.is_empty() {
            self.stats.solutions += 1;
            debug!(decisions = self.stats.decisions, "solution found");
            if let Some(tracker) = &mut settings.solution_tracker {
                tracker.capture_solution(self);
            }
            return true;
        }
        let chosen = settings.decider.decide(&unassigned, self);
        debug_assert!(
            unassigned.contains(&chosen),
            "decider returned an assigned decision"
        );
        for value in 0..self.store.value_size {
            self.stats.decisions += 1;
            if let Some(tracker) = &mut settings.decision_tracker {
                tracker.capture_decision(self);
            }
            self.store.snapshot();
            self.store.restrict_to(chosen, value);
            if self.propagate() && self.solve_rec(settings) {
                return true;
            }
            self.store.undo();
            self.stats.backtracks += 1;
        }
        false
    }

    /// Runs constraint propagation to a fixpoint.
    ///
    /// Each round drains the dirty queue, partitions the drained decisions
    /// by the groups they feed, and applies each affected group's checker
    /// once with the positions that changed. Restrictions made by the
    /// checkers queue further work; the loop ends when a round leaves the
    /// queue empty. Returns `false` (with the dirty queue and conflict
    /// flag cleared) as soon as any checker rejects or any domain empties.
    pub(crate) fn propagate(&mut self) -> bool {
        if self.store.conflict {
            self.store.dirty.clear();
            self.store.conflict = false;
            return false;
        }
        while !self.store.dirty.is_empty() {
            self.stats.rounds += 1;
            let mut buckets: BTreeMap<GroupId, Vec<usize>> = BTreeMap::new();
            for id in self.store.dirty.drain() {
                for &gid in &self.store.decisions[id].groups {
                    buckets
                        .entry(gid)
                        .or_default()
                        .push(self.groups[gid].positions[&id]);
                }
            }
            let mut rejected = false;
            for (&gid, dirty) in &buckets {
                let group = &self.groups[gid];
                self.stats.groups[gid].applies += 1;
                let ok = group.checker.apply(
                    &mut GroupScope {
                        store: &mut self.store,
                        members: &group.members,
                    },
                    dirty,
                );
                if !ok {
                    trace!(group = gid, "constraint rejected");
                    self.stats.groups[gid].rejections += 1;
                    rejected = true;
                    break;
                }
            }
            if rejected || self.store.conflict {
                self.store.dirty.clear();
                self.store.conflict = false;
                return false;
            }
        }
        self.store.conflict = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::solver::{
        constraints::{all_different::AllDifferent, equality::Equality},
        decider::SelectFirstDecider,
    };

    fn domains(problem: &Problem) -> Vec<Vec<usize>> {
        (0..problem.size())
            .map(|id| {
                (0..problem.value_size())
                    .filter(|&v| problem.possible(id, v))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn pinned_problem_solves_without_search() {
        let mut problem = Problem::new(2, 2);
        problem.set(0, 0);
        problem.set(1, 1);
        let mut decider = SelectFirstDecider;
        assert!(problem.solve(&mut Settings::new(&mut decider)));
        assert_eq!(problem.assignment(), vec![Some(0), Some(1)]);
    }

    #[test]
    fn empty_domain_fails_the_solve() {
        let mut problem = Problem::new(1, 2);
        problem.restrict(0, 0);
        problem.restrict(0, 1);
        let mut decider = SelectFirstDecider;
        assert!(!problem.solve(&mut Settings::new(&mut decider)));
    }

    #[test]
    fn failed_solve_unwinds_every_branch_assignment() {
        // Two decisions that must differ and must be equal: unsolvable,
        // but the initial state itself is consistent.
        let mut problem = Problem::new(2, 2);
        problem.add_group(&[0, 1], AllDifferent::new());
        problem.add_group(&[0, 1], Equality::new());
        let before = domains(&problem);
        let mut decider = SelectFirstDecider;
        assert!(!problem.solve(&mut Settings::new(&mut decider)));
        assert_eq!(domains(&problem), before);
    }

    #[test]
    fn undo_restores_the_exact_snapshot() {
        let mut problem = Problem::new(3, 4);
        problem.restrict(0, 3);
        let before = domains(&problem);
        problem.store.snapshot();
        problem.store.restrict(0, 1);
        problem.store.restrict_to(1, 2);
        problem.store.restrict(2, 0);
        assert_ne!(domains(&problem), before);
        problem.store.undo();
        assert_eq!(domains(&problem), before);
    }

    #[test]
    fn nested_undo_frames_restore_in_order() {
        let mut problem = Problem::new(2, 3);
        let initial = domains(&problem);
        problem.store.snapshot();
        problem.store.restrict(0, 0);
        let mid = domains(&problem);
        problem.store.snapshot();
        problem.store.restrict(0, 1);
        problem.store.restrict(1, 2);
        problem.store.undo();
        assert_eq!(domains(&problem), mid);
        problem.store.undo();
        assert_eq!(domains(&problem), initial);
    }

    proptest! {
        #[test]
        fn undo_exactness_for_arbitrary_restrictions(
            removals in proptest::collection::vec((0usize..6, 0usize..5), 0..40),
        ) {
            let mut problem = Problem::new(6, 5);
            problem.store.snapshot();
            let before = domains(&problem);
            for (id, value) in removals {
                problem.store.restrict(id, value);
            }
            problem.store.undo();
            prop_assert_eq!(domains(&problem), before);
        }

        // Shuffling the order in which groups are attached permutes the
        // order dirty decisions are partitioned and applied; the fixpoint
        // must not care.
        #[test]
        fn propagation_is_confluent_under_group_order(
            order in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle(),
            pins in proptest::collection::vec((0usize..9, 0usize..3), 1..4),
        ) {
            let group_sets: [&[DecisionId]; 6] = [
                &[0, 1, 2],
                &[3, 4, 5],
                &[6, 7, 8],
                &[0, 3, 6],
                &[1, 4, 7],
                &[2, 5, 8],
            ];
            let build = |order: &[usize]| {
                let mut problem = Problem::new(9, 3);
                for &g in order {
                    problem.add_group(group_sets[g], AllDifferent::new());
                }
                for &(id, value) in &pins {
                    problem.set(id, value);
                }
                let ok = problem.propagate();
                (ok, domains(&problem))
            };
            let baseline: Vec<usize> = (0..6).collect();
            prop_assert_eq!(build(&baseline), build(&order));
        }
    }
}
