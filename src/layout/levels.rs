use std::collections::{HashMap, VecDeque};

use crate::ir::CourseId;

use super::LayoutError;
use super::graph::CourseEdge;

/// Longest-prerequisite-chain depth for every node.
///
/// Kahn's algorithm in node order; a node's depth is settled when it is
/// dequeued, after all of its prerequisites. Any node that never becomes
/// ready sits on or behind a cycle, which is reported instead of guessed.
pub fn compute_depths(
    node_ids: &[CourseId],
    edges: &[CourseEdge],
) -> Result<HashMap<CourseId, usize>, LayoutError> {
    let index: HashMap<CourseId, usize> = node_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (*id, idx))
        .collect();

    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_ids.len()];
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_ids.len()];
    for edge in edges {
        let (Some(&from), Some(&to)) = (index.get(&edge.source), index.get(&edge.target)) else {
            continue;
        };
        outgoing[from].push(to);
        incoming[to].push(from);
    }

    let mut indegree: Vec<usize> = incoming.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..node_ids.len())
        .filter(|idx| indegree[*idx] == 0)
        .collect();
    let mut depth: Vec<Option<usize>> = vec![None; node_ids.len()];

    while let Some(idx) = queue.pop_front() {
        let level = incoming[idx]
            .iter()
            .filter_map(|pred| depth[*pred])
            .map(|d| d + 1)
            .max()
            .unwrap_or(0);
        depth[idx] = Some(level);
        for next in &outgoing[idx] {
            indegree[*next] -= 1;
            if indegree[*next] == 0 {
                queue.push_back(*next);
            }
        }
    }

    if let Some(start) = depth.iter().position(Option::is_none) {
        let cycle = trace_cycle(start, &incoming, &depth)
            .into_iter()
            .map(|idx| node_ids[idx])
            .collect();
        return Err(LayoutError::CyclicGraph { cycle });
    }

    Ok(node_ids
        .iter()
        .zip(depth)
        .map(|(id, d)| (*id, d.unwrap_or(0)))
        .collect())
}

/// Walk unresolved prerequisites backwards from `start` until a node repeats.
/// Every unresolved node has an unresolved prerequisite, so the walk closes.
/// Returned in prerequisite order with the first node repeated at the end.
fn trace_cycle(start: usize, incoming: &[Vec<usize>], depth: &[Option<usize>]) -> Vec<usize> {
    let mut path = vec![start];
    let mut position: HashMap<usize, usize> = HashMap::from([(start, 0)]);
    let mut current = start;
    loop {
        let Some(&pred) = incoming[current].iter().find(|pred| depth[**pred].is_none()) else {
            return path;
        };
        if let Some(&at) = position.get(&pred) {
            let mut cycle = path.split_off(at);
            cycle.push(pred);
            cycle.reverse();
            return cycle;
        }
        position.insert(pred, path.len());
        path.push(pred);
        current = pred;
    }
}
