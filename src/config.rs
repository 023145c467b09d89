use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub row_capacity: usize,
    pub box_size: BoxSize,
    pub focus_box_size: BoxSize,
    pub focus_mode: bool,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub department_gap: f32,
    pub baseline_course: String,
    pub label_padding: f32,
    pub label_line_height: f32,
    /// Upper bound on conflict-resolution passes; `None` derives it from the node count.
    pub max_resolve_passes: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_capacity: 4,
            box_size: BoxSize {
                width: 200.0,
                height: 64.0,
            },
            focus_box_size: BoxSize {
                width: 180.0,
                height: 56.0,
            },
            focus_mode: false,
            horizontal_gap: 30.0,
            vertical_gap: 80.0,
            margin_x: 100.0,
            margin_y: 60.0,
            department_gap: 80.0,
            baseline_course: "Matemática Inicial".to_string(),
            label_padding: 12.0,
            label_line_height: 1.3,
            max_resolve_passes: None,
        }
    }
}

impl LayoutConfig {
    pub fn active_box(&self) -> BoxSize {
        if self.focus_mode {
            self.focus_box_size
        } else {
            self.box_size
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub focus_zoom: f32,
    pub debounce_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 2.0,
            focus_zoom: 1.2,
            debounce_ms: 150,
        }
    }
}

impl ViewConfig {
    pub fn clamp_zoom(&self, scale: f32) -> f32 {
        let lo = self.min_zoom.min(self.max_zoom);
        let hi = self.max_zoom.max(self.min_zoom);
        scale.clamp(lo, hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub view: ViewConfig,
    pub viewport: Viewport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoxSizeFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    row_capacity: Option<usize>,
    box_size: Option<BoxSizeFile>,
    focus_box_size: Option<BoxSizeFile>,
    focus_mode: Option<bool>,
    horizontal_gap: Option<f32>,
    vertical_gap: Option<f32>,
    margin_x: Option<f32>,
    margin_y: Option<f32>,
    department_gap: Option<f32>,
    baseline_course: Option<String>,
    label_padding: Option<f32>,
    label_line_height: Option<f32>,
    max_resolve_passes: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ViewConfigFile {
    min_zoom: Option<f32>,
    max_zoom: Option<f32>,
    focus_zoom: Option<f32>,
    debounce_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    node_fill: Option<String>,
    node_text_color: Option<String>,
    line_color: Option<String>,
    required_by_color: Option<String>,
    prerequisite_for_color: Option<String>,
    dimmed_opacity: Option<f32>,
    bimonthly_color: Option<String>,
    even_semester_color: Option<String>,
    odd_semester_color: Option<String>,
    unknown_period_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    view: Option<ViewConfigFile>,
    width: Option<f32>,
    height: Option<f32>,
}

/// Load a JSON5 config file on top of the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "dark" {
            config.theme = Theme::dark();
        } else if theme_name == "default" || theme_name == "light" {
            config.theme = Theme::light();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.node_fill {
            theme.node_fill = v;
        }
        if let Some(v) = vars.node_text_color {
            theme.node_text_color = v;
        }
        if let Some(v) = vars.line_color {
            theme.line_color = v;
        }
        if let Some(v) = vars.required_by_color {
            theme.required_by_color = v;
        }
        if let Some(v) = vars.prerequisite_for_color {
            theme.prerequisite_for_color = v;
        }
        if let Some(v) = vars.dimmed_opacity {
            theme.dimmed_opacity = v;
        }
        if let Some(v) = vars.bimonthly_color {
            theme.bimonthly_color = v;
        }
        if let Some(v) = vars.even_semester_color {
            theme.even_semester_color = v;
        }
        if let Some(v) = vars.odd_semester_color {
            theme.odd_semester_color = v;
        }
        if let Some(v) = vars.unknown_period_color {
            theme.unknown_period_color = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.row_capacity {
            target.row_capacity = v;
        }
        if let Some(size) = layout.box_size {
            merge_box_size(&mut target.box_size, size);
        }
        if let Some(size) = layout.focus_box_size {
            merge_box_size(&mut target.focus_box_size, size);
        }
        if let Some(v) = layout.focus_mode {
            target.focus_mode = v;
        }
        if let Some(v) = layout.horizontal_gap {
            target.horizontal_gap = v;
        }
        if let Some(v) = layout.vertical_gap {
            target.vertical_gap = v;
        }
        if let Some(v) = layout.margin_x {
            target.margin_x = v;
        }
        if let Some(v) = layout.margin_y {
            target.margin_y = v;
        }
        if let Some(v) = layout.department_gap {
            target.department_gap = v;
        }
        if let Some(v) = layout.baseline_course {
            target.baseline_course = v;
        }
        if let Some(v) = layout.label_padding {
            target.label_padding = v;
        }
        if let Some(v) = layout.label_line_height {
            target.label_line_height = v;
        }
        if layout.max_resolve_passes.is_some() {
            target.max_resolve_passes = layout.max_resolve_passes;
        }
    }

    if let Some(view) = parsed.view {
        if let Some(v) = view.min_zoom {
            config.view.min_zoom = v;
        }
        if let Some(v) = view.max_zoom {
            config.view.max_zoom = v;
        }
        if let Some(v) = view.focus_zoom {
            config.view.focus_zoom = v;
        }
        if let Some(v) = view.debounce_ms {
            config.view.debounce_ms = v;
        }
    }

    if let Some(width) = parsed.width {
        config.viewport.width = width;
    }
    if let Some(height) = parsed.height {
        config.viewport.height = height;
    }

    Ok(config)
}

fn merge_box_size(target: &mut BoxSize, file: BoxSizeFile) {
    if let Some(width) = file.width {
        target.width = width;
    }
    if let Some(height) = file.height {
        target.height = height;
    }
}
