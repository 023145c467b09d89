use crate::interaction::{EdgeState, Transform};
use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub row_count: usize,
    pub transform: Transform,
    pub departments: Vec<DepartmentDump>,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDump {
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub width: f32,
    pub node_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: u32,
    pub department_id: u32,
    pub depth: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
    pub label_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub credits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,
    pub period: &'static str,
    pub has_prerequisite: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub source_id: u32,
    pub target_id: u32,
    pub state: EdgeState,
    pub path: String,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, edge_states: &[EdgeState], transform: Transform) -> Self {
        let nodes = layout
            .nodes
            .values()
            .map(|node| NodeDump {
                id: node.id,
                department_id: node.department_id,
                depth: node.depth,
                row: node.row,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                label: node.label.clone(),
                label_lines: node.label_lines.clone(),
                code: node.code.clone(),
                credits: node.credits,
                min_credits: node.min_credits,
                period: node.period.as_str(),
                has_prerequisite: node.has_prerequisite,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| {
                let path = edge.path;
                EdgeDump {
                    source_id: edge.source,
                    target_id: edge.target,
                    state: edge_states.get(idx).copied().unwrap_or(EdgeState::Default),
                    path: path.to_svg_path(),
                    points: [path.start, path.control1, path.control2, path.end]
                        .iter()
                        .map(|(x, y)| [*x, *y])
                        .collect(),
                }
            })
            .collect();

        let departments = layout
            .departments
            .iter()
            .map(|dept| DepartmentDump {
                id: dept.id,
                name: dept.name.clone(),
                x: dept.x,
                width: dept.width,
                node_count: dept.node_count,
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            row_count: layout.row_count,
            transform,
            departments,
            nodes,
            edges,
        }
    }
}

pub fn layout_to_json(
    layout: &Layout,
    edge_states: &[EdgeState],
    transform: Transform,
) -> anyhow::Result<String> {
    let dump = LayoutDump::from_layout(layout, edge_states, transform);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(
    path: &Path,
    layout: &Layout,
    edge_states: &[EdgeState],
    transform: Transform,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, edge_states, transform);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
