use std::collections::HashMap;

use crate::config::{LayoutConfig, Viewport};
use crate::ir::{CourseId, DepartmentId};

use super::conflicts::RowTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnExtent {
    pub department: DepartmentId,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positions {
    /// Box centers.
    pub centers: HashMap<CourseId, (f32, f32)>,
    pub columns: Vec<ColumnExtent>,
    pub width: f32,
    pub height: f32,
}

fn span(count: usize, item: f32, gap: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * item + (count - 1) as f32 * gap
}

/// Place every (department, row) slot of the table.
///
/// Departments become columns in ascending id order, each as wide as its
/// widest row; the set of columns is centered in the viewport and every row is
/// centered inside its column.
pub fn assign_positions(table: &RowTable, config: &LayoutConfig, viewport: Viewport) -> Positions {
    let size = config.active_box();
    let step_x = size.width + config.horizontal_gap;
    let step_y = size.height + config.vertical_gap;

    let widths: Vec<(DepartmentId, f32)> = table
        .departments
        .keys()
        .map(|dept| (*dept, span(table.max_row_width(*dept), size.width, config.horizontal_gap)))
        .collect();
    let total_width = widths.iter().map(|(_, w)| *w).sum::<f32>()
        + widths.len().saturating_sub(1) as f32 * config.department_gap;
    let start_x = ((viewport.width - total_width) / 2.0).max(config.margin_x);

    let mut positions = Positions::default();
    let mut column_x = start_x;
    for (dept, column_width) in widths {
        positions.columns.push(ColumnExtent {
            department: dept,
            x: column_x,
            width: column_width,
        });
        if let Some(rows) = table.departments.get(&dept) {
            for (row, ids) in rows {
                let row_width = span(ids.len(), size.width, config.horizontal_gap);
                let row_x = column_x + (column_width - row_width) / 2.0;
                let center_y = config.margin_y + *row as f32 * step_y + size.height / 2.0;
                for (idx, id) in ids.iter().enumerate() {
                    let center_x = row_x + idx as f32 * step_x + size.width / 2.0;
                    positions.centers.insert(*id, (center_x, center_y));
                }
            }
        }
        column_x += column_width + config.department_gap;
    }

    positions.width = viewport.width.max(total_width + config.margin_x * 2.0);
    positions.height = config.margin_y * 2.0 + span(table.row_count(), size.height, config.vertical_gap);
    positions
}
