#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod interaction;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod normalize;
pub mod render;
pub mod session;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, ViewConfig, Viewport, load_config, parse_config};
pub use interaction::{
    EdgeState, Transform, ViewSession, ViewState, clear_highlight, focus_transform, highlight_for,
    reset_transform,
};
pub use ir::{Catalog, Course, CourseId, DepartmentId, Filters, Period};
pub use layout::{Layout, LayoutError, compute_layout};
pub use layout_dump::{LayoutDump, layout_to_json};
pub use render::render_svg;
pub use session::LayoutSession;
pub use theme::Theme;

/// Options accepted by [`layout_catalog_json`], camelCase on the wire.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    #[serde(flatten)]
    pub filters: Filters,
    pub focus_mode: bool,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub highlight: Option<CourseId>,
    pub focus: Option<CourseId>,
    pub theme: Option<String>,
}

/// Parse a catalog, lay it out and return the geometry dump as JSON.
pub fn layout_catalog_json(catalog_json: &str, options: LayoutOptions) -> anyhow::Result<String> {
    let catalog = Catalog::from_json(catalog_json)?;
    let mut config = Config::default();
    if options.theme.as_deref() == Some("dark") {
        config.theme = Theme::dark();
    }
    config.layout.focus_mode = options.focus_mode;
    if let Some(width) = options.width {
        config.viewport.width = width;
    }
    if let Some(height) = options.height {
        config.viewport.height = height;
    }

    let layout = compute_layout(
        &catalog,
        &options.filters,
        &config.theme,
        &config.layout,
        config.viewport,
    )?;
    let states = match options.highlight {
        Some(node) if layout.node(node).is_some() => highlight_for(&layout.edges, node),
        Some(node) => return Err(LayoutError::UnknownNode(node).into()),
        None => clear_highlight(&layout.edges),
    };
    let transform = match options.focus {
        Some(node) => focus_transform(&layout, node, config.viewport, &config.view)?,
        None => reset_transform(),
    };
    layout_to_json(&layout, &states, transform)
}
