use std::collections::{BTreeMap, HashMap};

use crate::ir::{CourseId, DepartmentId};

/// Map depths onto visual rows, wrapping any (department, depth) group that
/// holds more than `capacity` nodes onto extra rows. Later depth groups of the
/// same department shift down by the rows the overflow consumed.
pub fn assign_group_rows(
    node_ids: &[CourseId],
    departments: &HashMap<CourseId, DepartmentId>,
    depths: &HashMap<CourseId, usize>,
    capacity: usize,
) -> HashMap<CourseId, usize> {
    let capacity = capacity.max(1);
    let mut groups: BTreeMap<DepartmentId, BTreeMap<usize, Vec<CourseId>>> = BTreeMap::new();
    for id in node_ids {
        let department = departments.get(id).copied().unwrap_or_default();
        let depth = depths.get(id).copied().unwrap_or(0);
        groups
            .entry(department)
            .or_default()
            .entry(depth)
            .or_default()
            .push(*id);
    }

    let mut rows: HashMap<CourseId, usize> = HashMap::with_capacity(node_ids.len());
    for by_depth in groups.values() {
        let mut shift = 0usize;
        for (depth, ids) in by_depth {
            for (idx, id) in ids.iter().enumerate() {
                rows.insert(*id, depth + shift + idx / capacity);
            }
            shift += (ids.len() - 1) / capacity;
        }
    }
    rows
}
