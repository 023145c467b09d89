pub mod conflicts;
mod error;
pub mod graph;
pub mod levels;
pub mod position;
pub mod rows;
mod text;
mod types;

pub use conflicts::{RowTable, resolve_conflicts};
pub use error::LayoutError;
pub use graph::{CourseEdge, CourseGraph, CourseNode, GraphSelection, build_graph};
pub use levels::compute_depths;
pub use position::{Positions, assign_positions};
pub use rows::assign_group_rows;
pub use types::*;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::{LayoutConfig, Viewport};
use crate::ir::{Catalog, CourseId, Department, DepartmentId, Filters, department_name};
use crate::theme::Theme;
use text::wrap_label;

/// Resolve the active filters against the catalog.
pub fn resolve_selection<'a>(
    catalog: &'a Catalog,
    filters: &Filters,
) -> Result<GraphSelection<'a>, LayoutError> {
    let career = filters.career.map(|id| catalog.career(id)).transpose()?;
    let profile = filters.profile.map(|id| catalog.profile(id)).transpose()?;
    match (career, profile) {
        (Some(career), Some(profile)) if profile.career_id != career.id => {
            return Err(LayoutError::ProfileOutsideCareer {
                profile: profile.id,
                career: career.id,
            });
        }
        (None, Some(profile)) => {
            debug!(profile = profile.id, "profile filter ignored without a career");
        }
        _ => {}
    }
    Ok(GraphSelection {
        career,
        profile,
        show_baseline: filters.show_baseline,
    })
}

/// Full pipeline: filter, level, wrap, resolve and place.
pub fn compute_layout(
    catalog: &Catalog,
    filters: &Filters,
    theme: &Theme,
    config: &LayoutConfig,
    viewport: Viewport,
) -> Result<Layout, LayoutError> {
    let selection = resolve_selection(catalog, filters)?;
    let graph = build_graph(&catalog.courses, &selection, &config.baseline_course);
    layout_graph(&graph, &catalog.departments, theme, config, viewport)
}

/// Lay out an already filtered graph.
pub fn layout_graph(
    graph: &CourseGraph,
    departments: &[Department],
    theme: &Theme,
    config: &LayoutConfig,
    viewport: Viewport,
) -> Result<Layout, LayoutError> {
    debug!(nodes = graph.nodes.len(), edges = graph.edges.len(), "layout start");
    if graph.nodes.is_empty() {
        let positions = assign_positions(&RowTable::default(), config, viewport);
        return Ok(Layout {
            width: positions.width,
            height: positions.height,
            ..Default::default()
        });
    }

    let node_ids: Vec<CourseId> = graph.nodes.iter().map(|node| node.id).collect();
    let node_departments: HashMap<CourseId, DepartmentId> = graph
        .nodes
        .iter()
        .map(|node| (node.id, node.department_id))
        .collect();

    let depths = compute_depths(&node_ids, &graph.edges)?;
    let mut rows = assign_group_rows(&node_ids, &node_departments, &depths, config.row_capacity);
    let passes = resolve_conflicts(
        &node_ids,
        &node_departments,
        &mut rows,
        &graph.edges,
        config.row_capacity,
        config.max_resolve_passes,
    )?;
    let table = RowTable::build(&node_ids, &node_departments, &rows);
    debug!(passes, rows = table.row_count(), "rows resolved");

    let positions = assign_positions(&table, config, viewport);
    let size = config.active_box();

    let mut nodes: BTreeMap<CourseId, NodeLayout> = BTreeMap::new();
    for node in &graph.nodes {
        let (x, y) = positions.centers.get(&node.id).copied().unwrap_or_default();
        nodes.insert(
            node.id,
            NodeLayout {
                id: node.id,
                department_id: node.department_id,
                depth: depths.get(&node.id).copied().unwrap_or(0),
                row: rows.get(&node.id).copied().unwrap_or(0),
                x,
                y,
                width: size.width,
                height: size.height,
                label: node.name.clone(),
                label_lines: wrap_label(&node.name, theme, config, size),
                code: node.code.clone(),
                credits: node.credits,
                min_credits: node.min_credits,
                period: node.period,
                has_prerequisite: node.has_prerequisite,
            },
        );
    }

    let edges = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let source = nodes.get(&edge.source)?;
            let target = nodes.get(&edge.target)?;
            Some(EdgeLayout {
                source: edge.source,
                target: edge.target,
                path: PathGeometry::between(source, target),
            })
        })
        .collect();

    let departments = positions
        .columns
        .iter()
        .map(|column| DepartmentLayout {
            id: column.department,
            name: department_name(departments, column.department),
            x: column.x,
            width: column.width,
            node_count: table
                .departments
                .get(&column.department)
                .map(|rows| rows.values().map(Vec::len).sum())
                .unwrap_or(0),
        })
        .collect();

    Ok(Layout {
        nodes,
        edges,
        departments,
        row_count: table.row_count(),
        width: positions.width,
        height: positions.height,
    })
}
