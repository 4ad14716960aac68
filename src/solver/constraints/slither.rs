//! The slitherlink checkers: line segments take value 1 ("on", part of
//! the fence) or 0 ("off"), and the board must resolve to a single closed
//! loop. Only the board adapter knows the 2-D layout; these checkers see
//! segments positionally, with [`SingleLoop`] carrying the vertex/segment
//! adjacency as plain data.

use crate::solver::{
    constraint::{ConstraintChecker, ConstraintDescriptor},
    problem::GroupScope,
};

const OFF: usize = 0;
const ON: usize = 1;

/// Degree constraint for one vertex: of the segments meeting there,
/// either none or exactly two are on (the loop passes through or misses a
/// vertex, never ends at one).
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexDegree;

impl VertexDegree {
    pub fn new() -> Self {
        Self
    }
}

impl ConstraintChecker for VertexDegree {
    fn apply(&self, scope: &mut GroupScope<'_>, _dirty: &[usize]) -> bool {
        let mut on = 0;
        let mut possible = 0;
        for pos in 0..scope.len() {
            if scope.value(pos) == Some(ON) {
                on += 1;
            }
            if scope.possible(pos, ON) {
                possible += 1;
            }
        }
        if on > 2 || (on == 1 && possible == 1) {
            return false;
        }
        if on == 1 && possible == 2 {
            // One segment enters and only one candidate can complete the
            // pair: force it.
            for pos in 0..scope.len() {
                if scope.possible(pos, ON) {
                    scope.restrict_to(pos, ON);
                }
            }
        } else if possible < 2 {
            // The pair can no longer form; the loop avoids this vertex.
            for pos in 0..scope.len() {
                scope.restrict_to(pos, OFF);
            }
        }
        true
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "VertexDegree".to_string(),
            description: "0 or 2 incident segments on".to_string(),
        }
    }
}

/// Clue constraint for one cell: exactly `target` of its four sides are
/// on.
#[derive(Debug, Clone)]
pub struct BoxCount {
    target: usize,
}

impl BoxCount {
    pub fn new(target: usize) -> Self {
        Self { target }
    }
}

impl ConstraintChecker for BoxCount {
    fn init(&mut self, scope: &mut GroupScope<'_>) {
        // A zero clue decides all four sides up front.
        if self.target == 0 {
            for pos in 0..scope.len() {
                scope.restrict_to(pos, OFF);
            }
        }
    }

    fn apply(&self, scope: &mut GroupScope<'_>, _dirty: &[usize]) -> bool {
        let mut on = 0;
        let mut possible = 0;
        for pos in 0..scope.len() {
            if scope.value(pos) == Some(ON) {
                on += 1;
            }
            if scope.possible(pos, ON) {
                possible += 1;
            }
        }
        if possible < self.target || on > self.target {
            return false;
        }
        if possible == self.target {
            for pos in 0..scope.len() {
                if scope.possible(pos, ON) {
                    scope.restrict_to(pos, ON);
                }
            }
            on = self.target;
        }
        if on == self.target {
            for pos in 0..scope.len() {
                if scope.value(pos) != Some(ON) {
                    scope.restrict_to(pos, OFF);
                }
            }
        }
        true
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "BoxCount".to_string(),
            description: format!("{} of 4 sides on", self.target),
        }
    }
}

/// Global single-loop constraint over every segment of the board.
///
/// The caller supplies the adjacency: for each vertex, the positions (in
/// this group's member order) of its incident segments, and for each
/// member, its two endpoint vertices. `apply` walks the on-segments from
/// every vertex, never immediately reusing the segment it arrived by,
/// classifying each walk as a closed loop (a vertex repeats) or an
/// unfinished path (the walk dies out). A closed loop coexisting with an
/// unfinished path can never become a single loop, and is rejected;
/// anything else is still completable and passes.
#[derive(Debug, Clone)]
pub struct SingleLoop {
    vertex_lines: Vec<Vec<usize>>,
    line_vertices: Vec<[usize; 2]>,
}

impl SingleLoop {
    pub fn new(vertex_lines: Vec<Vec<usize>>, line_vertices: Vec<[usize; 2]>) -> Self {
        Self {
            vertex_lines,
            line_vertices,
        }
    }
}

impl ConstraintChecker for SingleLoop {
    fn init(&mut self, scope: &mut GroupScope<'_>) {
        debug_assert_eq!(
            self.line_vertices.len(),
            scope.len(),
            "adjacency must describe every member segment"
        );
    }

    fn apply(&self, scope: &mut GroupScope<'_>, _dirty: &[usize]) -> bool {
        let mut closed_loop = false;
        let mut unfinished_path = false;
        for start in 0..self.vertex_lines.len() {
            let mut seen = vec![false; self.vertex_lines.len()];
            let mut current = start;
            let mut arrived_by: Option<usize> = None;
            loop {
                let next = self.vertex_lines[current]
                    .iter()
                    .copied()
                    .find(|&line| Some(line) != arrived_by && scope.value(line) == Some(ON));
                let Some(line) = next else {
                    if seen.iter().any(|&s| s) {
                        unfinished_path = true;
                    }
                    break;
                };
                arrived_by = Some(line);
                seen[current] = true;
                let [a, b] = self.line_vertices[line];
                current = if current == a { b } else { a };
                if seen[current] {
                    closed_loop = true;
                    break;
                }
            }
        }
        !(closed_loop && unfinished_path)
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "SingleLoop".to_string(),
            description: "on segments form one closed loop".to_string(),
        }
    }
}
