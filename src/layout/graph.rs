use std::collections::HashSet;

use tracing::{debug, warn};

use crate::ir::{Career, Course, CourseId, DepartmentId, Period, Profile};
use crate::normalize::normalize_course_name;

#[derive(Debug, Clone, PartialEq)]
pub struct CourseNode {
    pub id: CourseId,
    pub department_id: DepartmentId,
    pub name: String,
    pub code: Option<String>,
    pub credits: u32,
    pub min_credits: Option<u32>,
    pub period: Period,
    pub has_prerequisite: bool,
}

/// Prerequisite edge: `source` must be completed before `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseEdge {
    pub source: CourseId,
    pub target: CourseId,
}

impl CourseEdge {
    pub fn new(source: CourseId, target: CourseId) -> Self {
        Self { source, target }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseGraph {
    pub nodes: Vec<CourseNode>,
    pub edges: Vec<CourseEdge>,
}

impl CourseGraph {
    pub fn contains(&self, id: CourseId) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphSelection<'a> {
    pub career: Option<&'a Career>,
    /// Only honored together with a career.
    pub profile: Option<&'a Profile>,
    pub show_baseline: bool,
}

pub fn build_graph(
    courses: &[Course],
    selection: &GraphSelection<'_>,
    baseline_name: &str,
) -> CourseGraph {
    let removed = baseline_ids(courses, selection.show_baseline, baseline_name);
    if !removed.is_empty() {
        debug!(ids = ?removed, "baseline course hidden");
    }

    let allowed: Option<HashSet<CourseId>> = selection.career.map(|career| {
        let mut ids: HashSet<CourseId> = career
            .mandatory
            .iter()
            .chain(career.optional.iter())
            .map(|course| course.id)
            .collect();
        if let Some(profile) = selection.profile {
            ids.extend(profile.mandatory.iter().map(|course| course.id));
        }
        ids
    });

    let kept: Vec<&Course> = courses
        .iter()
        .filter(|course| course.active)
        .filter(|course| !removed.contains(&course.id))
        .filter(|course| allowed.as_ref().is_none_or(|ids| ids.contains(&course.id)))
        .collect();
    let kept_ids: HashSet<CourseId> = kept.iter().map(|course| course.id).collect();

    let mut seen: HashSet<CourseEdge> = HashSet::new();
    let mut edges = Vec::new();
    let mut dropped = 0usize;
    for course in &kept {
        for prev in course.prerequisites() {
            if removed.contains(&prev) {
                continue;
            }
            if !kept_ids.contains(&prev) {
                dropped += 1;
                continue;
            }
            let edge = CourseEdge::new(prev, course.id);
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    if dropped > 0 {
        debug!(dropped, "prerequisite references outside the selection dropped");
    }

    let targets: HashSet<CourseId> = edges.iter().map(|edge| edge.target).collect();
    let nodes = kept
        .into_iter()
        .map(|course| CourseNode {
            id: course.id,
            department_id: course.department_id,
            name: course.name.clone(),
            code: course.code.clone(),
            credits: course.credits,
            min_credits: course.min_credits,
            period: course.period,
            has_prerequisite: targets.contains(&course.id),
        })
        .collect();

    CourseGraph { nodes, edges }
}

fn baseline_ids(courses: &[Course], show_baseline: bool, baseline_name: &str) -> HashSet<CourseId> {
    if show_baseline {
        return HashSet::new();
    }
    let key = normalize_course_name(baseline_name);
    if key.is_empty() {
        return HashSet::new();
    }
    let ids: HashSet<CourseId> = courses
        .iter()
        .filter(|course| normalize_course_name(&course.name) == key)
        .map(|course| course.id)
        .collect();
    if ids.len() > 1 {
        warn!(count = ids.len(), name = baseline_name, "several courses match the baseline name");
    }
    ids
}
