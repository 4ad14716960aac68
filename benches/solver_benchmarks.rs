use criterion::{black_box, criterion_group, criterion_main, Criterion};
use puzzlekit::solver::{
    constraints::{all_different::AllDifferent, run_length::RunLength},
    decider::{MinimumGroupDecider, MinimumRemainingValuesDecider, SelectFirstDecider},
    problem::{Problem, Settings},
};

// Problem definitions mirror the ones in tests/sudoku.rs and
// tests/nonogram.rs.

const SUDOKU: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

fn sudoku_problem() -> Problem {
    let mut problem = Problem::new(81, 9);
    for r in 0..9 {
        let row: Vec<usize> = (0..9).map(|c| r * 9 + c).collect();
        problem.add_group(&row, AllDifferent::covering());
    }
    for c in 0..9 {
        let col: Vec<usize> = (0..9).map(|r| r * 9 + c).collect();
        problem.add_group(&col, AllDifferent::covering());
    }
    for br in 0..3 {
        for bc in 0..3 {
            let mut boxed = Vec::new();
            for r in 0..3 {
                for c in 0..3 {
                    boxed.push((br * 3 + r) * 9 + bc * 3 + c);
                }
            }
            problem.add_group(&boxed, AllDifferent::covering());
        }
    }
    for r in 0..9 {
        for c in 0..9 {
            if SUDOKU[r][c] != 0 {
                problem.set(r * 9 + c, SUDOKU[r][c] - 1);
            }
        }
    }
    problem
}

fn sudoku_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sudoku Deciders");

    group.bench_function("SelectFirst", |b| {
        b.iter(|| {
            let mut problem = sudoku_problem();
            let mut decider = SelectFirstDecider;
            assert!(problem.solve(&mut Settings::new(&mut decider)));
            black_box(problem.value(0));
        })
    });

    group.bench_function("MinimumRemainingValues", |b| {
        b.iter(|| {
            let mut problem = sudoku_problem();
            let mut decider = MinimumRemainingValuesDecider;
            assert!(problem.solve(&mut Settings::new(&mut decider)));
            black_box(problem.value(0));
        })
    });

    group.bench_function("MinimumGroup", |b| {
        b.iter(|| {
            let mut problem = sudoku_problem();
            let mut decider = MinimumGroupDecider;
            assert!(problem.solve(&mut Settings::new(&mut decider)));
            black_box(problem.value(0));
        })
    });

    group.finish();
}

fn run_length_benchmark(c: &mut Criterion) {
    // A single loose row: propagation cost is dominated by the pruned
    // enumeration of run placements.
    c.bench_function("RunLength propagation, 30 cells", |b| {
        b.iter(|| {
            let mut problem = Problem::new(30, 2);
            let members: Vec<usize> = (0..30).collect();
            problem.add_group(&members, RunLength::new([3, 4, 5]));
            let mut decider = SelectFirstDecider;
            assert!(problem.solve(&mut Settings::new(&mut decider)));
            black_box(problem.value(0));
        })
    });
}

criterion_group!(benches, sudoku_benchmarks, run_length_benchmark);
criterion_main!(benches);
