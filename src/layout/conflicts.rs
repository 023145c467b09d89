use std::collections::{BTreeMap, HashMap};

use crate::ir::{CourseId, DepartmentId};

use super::LayoutError;
use super::graph::CourseEdge;

/// Department -> row -> node ids in node order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    pub departments: BTreeMap<DepartmentId, BTreeMap<usize, Vec<CourseId>>>,
}

impl RowTable {
    pub fn build(
        node_ids: &[CourseId],
        departments: &HashMap<CourseId, DepartmentId>,
        rows: &HashMap<CourseId, usize>,
    ) -> Self {
        let mut table = Self::default();
        for id in node_ids {
            let department = departments.get(id).copied().unwrap_or_default();
            let row = rows.get(id).copied().unwrap_or(0);
            table
                .departments
                .entry(department)
                .or_default()
                .entry(row)
                .or_default()
                .push(*id);
        }
        table
    }

    pub fn row_count(&self) -> usize {
        self.departments
            .values()
            .filter_map(|rows| rows.keys().next_back())
            .map(|row| row + 1)
            .max()
            .unwrap_or(0)
    }

    /// Widest row of a department, in nodes.
    pub fn max_row_width(&self, department: DepartmentId) -> usize {
        self.departments
            .get(&department)
            .and_then(|rows| rows.values().map(Vec::len).max())
            .unwrap_or(0)
    }
}

fn default_pass_limit(node_count: usize) -> usize {
    (node_count + 1) * (node_count + 1)
}

/// Push dependents below their prerequisites until every edge points strictly
/// downward, re-packing any (department, row) bucket that the pushes overfill.
///
/// Must run on an acyclic edge set. Returns the number of passes taken,
/// including the final pass that changed nothing.
pub fn resolve_conflicts(
    node_ids: &[CourseId],
    departments: &HashMap<CourseId, DepartmentId>,
    rows: &mut HashMap<CourseId, usize>,
    edges: &[CourseEdge],
    capacity: usize,
    max_passes: Option<usize>,
) -> Result<usize, LayoutError> {
    let capacity = capacity.max(1);
    let limit = max_passes.unwrap_or_else(|| default_pass_limit(node_ids.len()));

    for pass in 1..=limit {
        let mut changed = false;
        for edge in edges {
            let (Some(&source), Some(&target)) = (rows.get(&edge.source), rows.get(&edge.target))
            else {
                continue;
            };
            if target <= source {
                rows.insert(edge.target, source + 1);
                changed = true;
            }
        }
        if repack_overfull_rows(node_ids, departments, rows, capacity) {
            changed = true;
        }
        if !changed {
            return Ok(pass);
        }
    }
    Err(LayoutError::NotConverged { passes: limit })
}

fn repack_overfull_rows(
    node_ids: &[CourseId],
    departments: &HashMap<CourseId, DepartmentId>,
    rows: &mut HashMap<CourseId, usize>,
    capacity: usize,
) -> bool {
    let mut buckets: BTreeMap<(DepartmentId, usize), Vec<CourseId>> = BTreeMap::new();
    for id in node_ids {
        let Some(&row) = rows.get(id) else {
            continue;
        };
        let department = departments.get(id).copied().unwrap_or_default();
        buckets.entry((department, row)).or_default().push(*id);
    }

    let mut changed = false;
    for ((_, row), ids) in buckets {
        for id in ids.iter().skip(capacity) {
            rows.insert(*id, row + 1);
            changed = true;
        }
    }
    changed
}
