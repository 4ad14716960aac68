//! Progress and result observers.
//!
//! A [`DecisionTracker`] fires once per *attempted* value at a branch
//! point, including attempts propagation rejects immediately, so it
//! counts search effort, not solutions. Besides progress reporting, it is
//! the place to bound a search: the core has no timeout primitive, so a
//! caller wanting one signals abort out-of-band from its tracker. A
//! [`SolutionTracker`] fires once, on the first complete assignment.
//! Trackers observe; they must not mutate the problem.

use tracing::info;

use crate::solver::problem::Problem;

pub trait DecisionTracker {
    fn capture_decision(&mut self, problem: &Problem);
}

pub trait SolutionTracker {
    fn capture_solution(&mut self, problem: &Problem);
}

/// Counts attempted values.
#[derive(Debug, Default)]
pub struct DecisionCounter {
    pub count: u64,
}

impl DecisionTracker for DecisionCounter {
    fn capture_decision(&mut self, _problem: &Problem) {
        self.count += 1;
    }
}

/// Logs every `every`-th attempted value.
#[derive(Debug)]
pub struct LogEveryN {
    count: u64,
    every: u64,
}

impl LogEveryN {
    pub fn new(every: u64) -> Self {
        Self { count: 0, every }
    }
}

impl DecisionTracker for LogEveryN {
    fn capture_decision(&mut self, _problem: &Problem) {
        self.count += 1;
        if self.count % self.every == 0 {
            info!(decisions = self.count, "search progress");
        }
    }
}

/// Logs at a geometrically thinning cadence: every multiple of `next`,
/// scaling `next` by `factor` each time a scale fills up. Useful for long
/// searches where a fixed cadence floods the log.
#[derive(Debug)]
pub struct LogEveryScaleN {
    count: u64,
    factor: u64,
    next: u64,
}

impl LogEveryScaleN {
    pub fn new(factor: u64) -> Self {
        Self {
            count: 0,
            factor,
            next: 1,
        }
    }
}

impl DecisionTracker for LogEveryScaleN {
    fn capture_decision(&mut self, _problem: &Problem) {
        self.count += 1;
        if self.count % self.next == 0 {
            info!(decisions = self.count, "search progress");
            if self.count / self.next == self.factor {
                self.next *= self.factor;
            }
        }
    }
}

/// Records the assignment of the first solution found.
#[derive(Debug, Default)]
pub struct SolutionCapture {
    pub assignment: Option<Vec<Option<usize>>>,
}

impl SolutionTracker for SolutionCapture {
    fn capture_solution(&mut self, problem: &Problem) {
        self.assignment = Some(problem.assignment());
    }
}
