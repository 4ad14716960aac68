//! End-to-end slitherlink: one decision per line segment over the values
//! {0 = off, 1 = on}, with a vertex-degree group per lattice point, a
//! box-count group per clue cell, and one global single-loop group.
//!
//! The 2-D layout lives entirely in this test harness: horizontal
//! segments are numbered first (row-major), then vertical segments.

use pretty_assertions::assert_eq;
use puzzlekit::solver::{
    constraints::slither::{BoxCount, SingleLoop, VertexDegree},
    decider::SelectFirstDecider,
    problem::{Problem, Settings},
};

struct Board {
    rows: usize,
    cols: usize,
    problem: Problem,
}

impl Board {
    fn new(input: &str) -> Self {
        let grid: Vec<&str> = input.lines().collect();
        let rows = grid.len();
        let cols = grid[0].len();
        let num_lines = cols * (rows + 1) + rows * (cols + 1);
        let mut problem = Problem::new(num_lines, 2);

        let horizontal = |r: usize, c: usize| r * cols + c;
        let vertical = |r: usize, c: usize| cols * (rows + 1) + r * (cols + 1) + c;
        let point_lines = |r: usize, c: usize| {
            let mut lines = Vec::new();
            if r > 0 {
                lines.push(vertical(r - 1, c));
            }
            if c > 0 {
                lines.push(horizontal(r, c - 1));
            }
            if r < rows {
                lines.push(vertical(r, c));
            }
            if c < cols {
                lines.push(horizontal(r, c));
            }
            lines
        };

        for r in 0..=rows {
            for c in 0..=cols {
                problem.add_group(&point_lines(r, c), VertexDegree::new());
            }
        }
        for (r, row) in grid.iter().enumerate() {
            for (c, clue) in row.bytes().enumerate() {
                if clue != b'.' {
                    let sides = vec![
                        horizontal(r, c),
                        vertical(r, c),
                        horizontal(r + 1, c),
                        vertical(r, c + 1),
                    ];
                    problem.add_group(&sides, BoxCount::new((clue - b'0') as usize));
                }
            }
        }

        // The loop group spans every segment, in id order, so member
        // positions coincide with segment ids.
        let mut line_endpoints = vec![Vec::new(); num_lines];
        let mut vertex_lines = Vec::new();
        for r in 0..=rows {
            for c in 0..=cols {
                let vertex = r * (cols + 1) + c;
                let lines = point_lines(r, c);
                for &line in &lines {
                    line_endpoints[line].push(vertex);
                }
                vertex_lines.push(lines);
            }
        }
        let line_vertices = line_endpoints
            .into_iter()
            .map(|ends| [ends[0], ends[1]])
            .collect();
        let members: Vec<usize> = (0..num_lines).collect();
        problem.add_group(&members, SingleLoop::new(vertex_lines, line_vertices));

        Self {
            rows,
            cols,
            problem,
        }
    }

    fn solve(&mut self) -> bool {
        let mut decider = SelectFirstDecider;
        self.problem.solve(&mut Settings::new(&mut decider))
    }

    fn render(&self) -> String {
        let horizontal = |r: usize, c: usize| r * self.cols + c;
        let vertical =
            |r: usize, c: usize| self.cols * (self.rows + 1) + r * (self.cols + 1) + c;
        let mut out = Vec::new();
        for r in 0..=self.rows {
            let mut line = String::from(".");
            for c in 0..self.cols {
                line.push(if self.problem.value(horizontal(r, c)) == Some(1) {
                    '-'
                } else {
                    'X'
                });
                line.push('.');
            }
            out.push(line);
            if r < self.rows {
                let mut line = String::new();
                for c in 0..=self.cols {
                    line.push(if self.problem.value(vertical(r, c)) == Some(1) {
                        '|'
                    } else {
                        'X'
                    });
                    if c != self.cols {
                        line.push(' ');
                    }
                }
                out.push(line);
            }
        }
        out.join("\n")
    }
}

#[test]
fn trivial_1x1_with_full_clue() {
    let _ = tracing_subscriber::fmt::try_init();
    let mut board = Board::new("4");
    assert!(board.solve());
    assert_eq!(board.render(), ".-.\n| |\n.-.");
}

#[test]
fn empty_1x1() {
    let mut board = Board::new("0");
    assert!(board.solve());
    assert_eq!(board.render(), ".X.\nX X\n.X.");
}

#[test]
fn basic_5x5_requiring_the_loop_constraint() {
    let input = "\
...1.
32.2.
.22..
.223.
.22.3";
    let want = "\
.-.-.-.-.-.
| X X X X |
.X.-.-.X.-.
| | X | | X
.-.X.-.X.-.
X X | X X |
.X.-.X.-.X.
X | X | | |
.-.X.-.X.X.
| X | X | |
.-.-.X.X.-.";
    let mut board = Board::new(input);
    assert!(board.solve());
    assert_eq!(board.render(), want);
}

#[test]
fn conflicting_adjacent_clues_are_unsolvable() {
    // Two adjacent cells demanding all four sides each put three on
    // segments at their shared vertices, which no vertex allows.
    let mut board = Board::new("44");
    assert!(!board.solve());
}
