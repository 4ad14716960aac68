use crate::solver::{
    constraint::{ConstraintChecker, ConstraintDescriptor},
    constraints::buildup::BuildupSet,
    problem::GroupScope,
};

const GAP: usize = 0;
const FILL: usize = 1;

/// A nonogram row or column: the group's members, read in order, must
/// contain the given runs of filled cells (value 1), in order, separated
/// by at least one gap cell (value 0).
///
/// `apply` enumerates every placement of the remaining runs, pruning a
/// branch when the cells left cannot fit the runs plus their mandatory
/// separating gaps, or when a required cell state is no longer possible.
/// The values surviving across all feasible placements become each cell's
/// new domain.
#[derive(Debug, Clone)]
pub struct RunLength {
    lengths: Vec<usize>,
}

impl RunLength {
    pub fn new(lengths: impl IntoIterator<Item = usize>) -> Self {
        Self {
            lengths: lengths.into_iter().collect(),
        }
    }

    fn place(
        &self,
        scope: &GroupScope<'_>,
        reachable: &mut BuildupSet,
        lengths: &[usize],
        pos: usize,
    ) {
        if pos == scope.len() {
            return;
        }
        let cells = scope.len() - pos;
        let needed = lengths.iter().sum::<usize>() + lengths.len().saturating_sub(1);
        if needed > cells {
            return;
        }
        // The cell at `pos` may open (or extend) a gap.
        if scope.possible(pos, GAP) {
            reachable.push(GAP);
            self.place(scope, reachable, lengths, pos + 1);
            reachable.pop();
        }
        // Or it may start the next run.
        let Some((&run, rest)) = lengths.split_first() else {
            return;
        };
        let mut pushed = 0;
        for offset in 0..run {
            if !scope.possible(pos + offset, FILL) {
                for _ in 0..pushed {
                    reachable.pop();
                }
                return;
            }
            reachable.push(FILL);
            pushed += 1;
        }
        if cells > run {
            // A run not ending at the edge needs a gap right after it.
            if !scope.possible(pos + run, GAP) {
                for _ in 0..pushed {
                    reachable.pop();
                }
                return;
            }
            reachable.push(GAP);
            pushed += 1;
            self.place(scope, reachable, rest, pos + run + 1);
        }
        for _ in 0..pushed {
            reachable.pop();
        }
    }
}

impl ConstraintChecker for RunLength {
    fn apply(&self, scope: &mut GroupScope<'_>, _dirty: &[usize]) -> bool {
        let mut reachable = BuildupSet::new(scope.len(), scope.value_size());
        self.place(scope, &mut reachable, &self.lengths, 0);
        reachable.export(scope);
        true
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "RunLength".to_string(),
            description: format!("cells contain runs {:?}", self.lengths),
        }
    }
}
