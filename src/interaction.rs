use serde::Serialize;

use crate::config::{ViewConfig, Viewport};
use crate::ir::CourseId;
use crate::layout::{EdgeLayout, Layout, LayoutError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeState {
    Default,
    /// Edge ends at the highlighted course: one of its prerequisites.
    RequiredByThis,
    /// Edge starts at the highlighted course: it unlocks the target.
    PrerequisiteForThis,
    Dimmed,
}

pub fn highlight_for(edges: &[EdgeLayout], node: CourseId) -> Vec<EdgeState> {
    edges
        .iter()
        .map(|edge| {
            if edge.target == node {
                EdgeState::RequiredByThis
            } else if edge.source == node {
                EdgeState::PrerequisiteForThis
            } else {
                EdgeState::Dimmed
            }
        })
        .collect()
}

pub fn clear_highlight(edges: &[EdgeLayout]) -> Vec<EdgeState> {
    vec![EdgeState::Default; edges.len()]
}

/// Screen = layout * scale + translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub fn apply(&self, point: (f32, f32)) -> (f32, f32) {
        (
            point.0 * self.scale + self.translate_x,
            point.1 * self.scale + self.translate_y,
        )
    }

    pub fn to_svg(&self) -> String {
        format!(
            "translate({:.2},{:.2}) scale({:.3})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Transform that puts the node's center in the middle of the viewport at the
/// focus zoom.
pub fn focus_transform(
    layout: &Layout,
    node: CourseId,
    viewport: Viewport,
    config: &ViewConfig,
) -> Result<Transform, LayoutError> {
    let target = layout.node(node).ok_or(LayoutError::UnknownNode(node))?;
    let scale = config.clamp_zoom(config.focus_zoom);
    Ok(Transform {
        translate_x: viewport.width / 2.0 - target.x * scale,
        translate_y: viewport.height / 2.0 - target.y * scale,
        scale,
    })
}

pub fn reset_transform() -> Transform {
    Transform::IDENTITY
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Identity,
    UserAdjusted,
    Focused { node: CourseId },
}

/// Current view transform and how it was reached. Survives data rebuilds.
#[derive(Debug, Clone)]
pub struct ViewSession {
    state: ViewState,
    transform: Transform,
    config: ViewConfig,
}

impl ViewSession {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            state: ViewState::Identity,
            transform: Transform::IDENTITY,
            config,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn pan(&mut self, dx: f32, dy: f32) -> Transform {
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
        self.state = ViewState::UserAdjusted;
        self.transform
    }

    /// Zoom by `factor` keeping the screen point `anchor` fixed.
    pub fn zoom_at(&mut self, factor: f32, anchor: (f32, f32)) -> Transform {
        let current = self.transform;
        let scale = self.config.clamp_zoom(current.scale * factor);
        let ratio = scale / current.scale;
        self.transform = Transform {
            translate_x: anchor.0 - (anchor.0 - current.translate_x) * ratio,
            translate_y: anchor.1 - (anchor.1 - current.translate_y) * ratio,
            scale,
        };
        self.state = ViewState::UserAdjusted;
        self.transform
    }

    pub fn focus(&mut self, node: CourseId, transform: Transform) -> Transform {
        self.transform = transform;
        self.state = ViewState::Focused { node };
        self.transform
    }

    pub fn reset(&mut self) -> Transform {
        self.transform = reset_transform();
        self.state = ViewState::Identity;
        self.transform
    }
}
