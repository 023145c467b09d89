use std::collections::BTreeMap;

use crate::ir::{CourseId, DepartmentId, Period};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub id: CourseId,
    pub department_id: DepartmentId,
    pub depth: usize,
    pub row: usize,
    /// Center of the box.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
    pub label_lines: Vec<String>,
    pub code: Option<String>,
    pub credits: u32,
    pub min_credits: Option<u32>,
    pub period: Period,
    pub has_prerequisite: bool,
}

impl NodeLayout {
    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }
}

/// Cubic curve from the bottom-center of the source box to the top-center of
/// the target box; both control points sit on the vertical midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathGeometry {
    pub start: (f32, f32),
    pub control1: (f32, f32),
    pub control2: (f32, f32),
    pub end: (f32, f32),
}

impl PathGeometry {
    pub fn between(source: &NodeLayout, target: &NodeLayout) -> Self {
        let start = (source.x, source.bottom());
        let end = (target.x, target.top());
        let mid_y = (start.1 + end.1) / 2.0;
        Self {
            start,
            control1: (start.0, mid_y),
            control2: (end.0, mid_y),
            end,
        }
    }

    pub fn to_svg_path(&self) -> String {
        format!(
            "M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
            self.start.0,
            self.start.1,
            self.control1.0,
            self.control1.1,
            self.control2.0,
            self.control2.1,
            self.end.0,
            self.end.1
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub source: CourseId,
    pub target: CourseId,
    pub path: PathGeometry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentLayout {
    pub id: DepartmentId,
    pub name: String,
    pub x: f32,
    pub width: f32,
    pub node_count: usize,
}

/// Finished geometry of one build. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub nodes: BTreeMap<CourseId, NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub departments: Vec<DepartmentLayout>,
    pub row_count: usize,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: CourseId) -> Option<&NodeLayout> {
        self.nodes.get(&id)
    }
}
