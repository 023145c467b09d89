use crate::config::LayoutConfig;
use crate::interaction::{EdgeState, Transform};
use crate::layout::{Layout, NodeLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const PERIOD_STRIPE: f32 = 5.0;

/// Render a finished layout. `edge_states` is indexed like `layout.edges`;
/// missing entries render in the default state.
pub fn render_svg(
    layout: &Layout,
    edge_states: &[EdgeState],
    transform: Transform,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    for (id, color) in [
        ("arrow", theme.line_color.as_str()),
        ("arrow-required", theme.required_by_color.as_str()),
        ("arrow-prerequisite", theme.prerequisite_for_color.as_str()),
    ] {
        svg.push_str(&format!(
            "<marker id=\"{id}\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{color}\"/></marker>",
        ));
    }
    svg.push_str("</defs>");

    svg.push_str(&format!("<g transform=\"{}\">", transform.to_svg()));

    for dept in &layout.departments {
        let label_x = dept.x + dept.width / 2.0;
        let label_y = (config.margin_y / 2.0).max(theme.font_size);
        svg.push_str(&format!(
            "<text x=\"{label_x:.2}\" y=\"{label_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\">{}</text>",
            theme.font_family,
            theme.font_size,
            theme.department_label_color,
            escape_xml(&dept.name)
        ));
    }

    for (idx, edge) in layout.edges.iter().enumerate() {
        let state = edge_states.get(idx).copied().unwrap_or(EdgeState::Default);
        let (stroke, opacity) = theme.edge_stroke(state);
        let (marker, width) = match state {
            EdgeState::RequiredByThis => ("arrow-required", 2.4),
            EdgeState::PrerequisiteForThis => ("arrow-prerequisite", 2.4),
            EdgeState::Default | EdgeState::Dimmed => ("arrow", 1.4),
        };
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{width}\" stroke-opacity=\"{opacity}\" marker-end=\"url(#{marker})\" data-source=\"{}\" data-target=\"{}\"/>",
            edge.path.to_svg_path(),
            edge.source,
            edge.target
        ));
    }

    for node in layout.nodes.values() {
        svg.push_str(&node_svg(node, theme, config));
    }

    svg.push_str("</g></svg>");
    svg
}

fn node_svg(node: &NodeLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut out = String::new();
    let x = node.left();
    let y = node.top();
    out.push_str(&format!(
        "<g data-id=\"{}\"><rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" ry=\"8\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.2\"/>",
        node.id, node.width, node.height, theme.node_fill, theme.node_border
    ));
    out.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{PERIOD_STRIPE}\" height=\"{:.2}\" fill=\"{}\"/>",
        node.height,
        theme.period_color(node.period)
    ));

    let line_height = theme.font_size * config.label_line_height;
    let total_height = node.label_lines.len() as f32 * line_height;
    let start_y = node.y - total_height / 2.0 + theme.font_size * 0.85;
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        node.x, theme.font_family, theme.font_size, theme.node_text_color
    ));
    for (idx, line) in node.label_lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        out.push_str(&format!(
            "<tspan x=\"{:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            node.x,
            escape_xml(line)
        ));
    }
    out.push_str("</text>");
    out.push_str(&format!("<title>{}</title></g>", escape_xml(&node_title(node))));
    out
}

fn node_title(node: &NodeLayout) -> String {
    let mut title = node.label.clone();
    if let Some(code) = &node.code {
        title.push_str(&format!(" ({code})"));
    }
    title.push_str(&format!(" - {} créditos", node.credits));
    if let Some(min) = node.min_credits {
        title.push_str(&format!(", mínimo {min}"));
    }
    title
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, svg)?,
        None => println!("{svg}"),
    }
    Ok(())
}
