use prettytable::{Cell, Row, Table};

use crate::solver::problem::Problem;

/// Counters accumulated during a single [`Problem::solve`] call.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Values attempted at branch points, including attempts pruned
    /// immediately by propagation.
    pub decisions: u64,
    /// Attempted values that were undone after their subtree failed.
    pub backtracks: u64,
    /// Solutions found (0 or 1; the search stops at the first).
    pub solutions: u64,
    /// Propagation rounds run across the whole search.
    pub rounds: u64,
    /// Per-group apply counters, indexed by `GroupId`.
    pub groups: Vec<GroupStats>,
}

#[derive(Debug, Default, Clone)]
pub struct GroupStats {
    /// Times this group's checker was applied.
    pub applies: u64,
    /// Times this group's checker rejected the current state.
    pub rejections: u64,
}

impl SearchStats {
    pub(crate) fn reset(&mut self, group_count: usize) {
        *self = SearchStats {
            groups: vec![GroupStats::default(); group_count],
            ..SearchStats::default()
        };
    }
}

/// Renders a per-group summary of the most recent solve as a text table.
pub fn render_stats_table(problem: &Problem) -> String {
    let stats = problem.stats();
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Group"),
        Cell::new("Constraint"),
        Cell::new("Description"),
        Cell::new("Applies"),
        Cell::new("Rejections"),
    ]));

    for gid in 0..problem.group_count() {
        let descriptor = problem.group_descriptor(gid);
        let group_stats = &stats.groups[gid];
        table.add_row(Row::new(vec![
            Cell::new(&gid.to_string()),
            Cell::new(&descriptor.name),
            Cell::new(&descriptor.description),
            Cell::new(&group_stats.applies.to_string()),
            Cell::new(&group_stats.rejections.to_string()),
        ]));
    }

    table.to_string()
}
