use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::{Config, LayoutConfig, Viewport};
use crate::interaction::{
    EdgeState, Transform, ViewSession, clear_highlight, focus_transform, highlight_for,
};
use crate::ir::{Catalog, CourseId, Filters};
use crate::layout::{Layout, LayoutError, compute_layout};
use crate::theme::Theme;

pub struct LayoutSession {
    catalog: Catalog,
    filters: Filters,
    theme: Theme,
    layout_config: LayoutConfig,
    viewport: Viewport,
    debounce: Duration,
    deadline: Option<Instant>,
    layout: Layout,
    builds: usize,
    highlight: Option<CourseId>,
    view: ViewSession,
}

impl LayoutSession {
    /// Validates the catalog and schedules the first build.
    pub fn new(catalog: Catalog, config: Config, now: Instant) -> Result<Self, LayoutError> {
        catalog.validate()?;
        let mut session = Self {
            catalog,
            filters: Filters::default(),
            theme: config.theme,
            layout_config: config.layout,
            viewport: config.viewport,
            debounce: Duration::from_millis(config.view.debounce_ms),
            deadline: None,
            layout: Layout::default(),
            builds: 0,
            highlight: None,
            view: ViewSession::new(config.view),
        };
        session.schedule(now);
        Ok(session)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn filters(&self) -> Filters {
        self.filters
    }

    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn view(&self) -> &ViewSession {
        &self.view
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.debounce);
    }

    /// A catalog that fails validation is rejected and the current one kept.
    pub fn set_catalog(&mut self, catalog: Catalog, now: Instant) -> Result<(), LayoutError> {
        catalog.validate()?;
        self.catalog = catalog;
        self.schedule(now);
        Ok(())
    }

    /// Switching careers drops the profile, which belongs to the old career.
    pub fn set_career(&mut self, career: Option<u32>, now: Instant) {
        if self.filters.career != career {
            self.filters.profile = None;
        }
        self.filters.career = career;
        self.schedule(now);
    }

    pub fn set_profile(&mut self, profile: Option<u32>, now: Instant) {
        self.filters.profile = profile;
        self.schedule(now);
    }

    pub fn set_show_baseline(&mut self, show: bool, now: Instant) {
        self.filters.show_baseline = show;
        self.schedule(now);
    }

    pub fn set_focus_mode(&mut self, focus_mode: bool, now: Instant) {
        self.layout_config.focus_mode = focus_mode;
        self.schedule(now);
    }

    pub fn set_viewport(&mut self, viewport: Viewport, now: Instant) {
        self.viewport = viewport;
        self.schedule(now);
    }

    /// Run the pending build once its debounce deadline has passed.
    /// Returns whether a build ran.
    pub fn poll(&mut self, now: Instant) -> Result<bool, LayoutError> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.rebuild()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Build immediately from the current catalog and filters. On failure the
    /// previous layout stays in place.
    pub fn rebuild(&mut self) -> Result<&Layout, LayoutError> {
        self.deadline = None;
        let layout = compute_layout(
            &self.catalog,
            &self.filters,
            &self.theme,
            &self.layout_config,
            self.viewport,
        )
        .inspect_err(|err| warn!(error = %err, "layout build failed"))?;
        self.builds += 1;
        debug!(build = self.builds, nodes = layout.nodes.len(), "layout rebuilt");
        if let Some(node) = self.highlight
            && layout.node(node).is_none()
        {
            self.highlight = None;
        }
        self.layout = layout;
        Ok(&self.layout)
    }

    pub fn highlight(&mut self, node: CourseId) -> Result<Vec<EdgeState>, LayoutError> {
        if self.layout.node(node).is_none() {
            return Err(LayoutError::UnknownNode(node));
        }
        self.highlight = Some(node);
        Ok(highlight_for(&self.layout.edges, node))
    }

    pub fn clear_highlight(&mut self) -> Vec<EdgeState> {
        self.highlight = None;
        clear_highlight(&self.layout.edges)
    }

    pub fn edge_states(&self) -> Vec<EdgeState> {
        match self.highlight {
            Some(node) => highlight_for(&self.layout.edges, node),
            None => clear_highlight(&self.layout.edges),
        }
    }

    /// Center the view on a course. Coordinates are not cached between
    /// renders, so the layout is rebuilt on the current filters first.
    pub fn focus(&mut self, node: CourseId) -> Result<Transform, LayoutError> {
        self.rebuild()?;
        let transform = focus_transform(&self.layout, node, self.viewport, self.view.config())?;
        Ok(self.view.focus(node, transform))
    }

    pub fn pan(&mut self, dx: f32, dy: f32) -> Transform {
        self.view.pan(dx, dy)
    }

    pub fn zoom_at(&mut self, factor: f32, anchor: (f32, f32)) -> Transform {
        self.view.zoom_at(factor, anchor)
    }

    pub fn reset_view(&mut self) -> Transform {
        self.view.reset()
    }
}
