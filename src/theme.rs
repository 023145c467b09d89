use serde::{Deserialize, Serialize};

use crate::interaction::EdgeState;
use crate::ir::Period;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub node_fill: String,
    pub node_border: String,
    pub node_text_color: String,
    pub line_color: String,
    pub required_by_color: String,
    pub prerequisite_for_color: String,
    pub dimmed_opacity: f32,
    pub bimonthly_color: String,
    pub even_semester_color: String,
    pub odd_semester_color: String,
    pub unknown_period_color: String,
    pub department_label_color: String,
    pub background: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            node_fill: "#F8FAFF".to_string(),
            node_border: "#C7D2E5".to_string(),
            node_text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            required_by_color: "#2563EB".to_string(),
            prerequisite_for_color: "#16A34A".to_string(),
            dimmed_opacity: 0.15,
            bimonthly_color: "#A855F7".to_string(),
            even_semester_color: "#F59E0B".to_string(),
            odd_semester_color: "#0EA5E9".to_string(),
            unknown_period_color: "#94A3B8".to_string(),
            department_label_color: "#475569".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            node_fill: "#1E293B".to_string(),
            node_border: "#334155".to_string(),
            node_text_color: "#E2E8F0".to_string(),
            line_color: "#64748B".to_string(),
            required_by_color: "#60A5FA".to_string(),
            prerequisite_for_color: "#4ADE80".to_string(),
            dimmed_opacity: 0.2,
            department_label_color: "#CBD5E1".to_string(),
            background: "#0F172A".to_string(),
            ..Self::light()
        }
    }

    /// Accent color for a course's offering period; unknown periods get the neutral fallback.
    pub fn period_color(&self, period: Period) -> &str {
        match period {
            Period::Bimonthly => &self.bimonthly_color,
            Period::EvenSemester => &self.even_semester_color,
            Period::OddSemester => &self.odd_semester_color,
            Period::Unknown => &self.unknown_period_color,
        }
    }

    /// Stroke color and opacity for an edge in the given highlight state.
    pub fn edge_stroke(&self, state: EdgeState) -> (&str, f32) {
        match state {
            EdgeState::Default => (&self.line_color, 1.0),
            EdgeState::RequiredByThis => (&self.required_by_color, 1.0),
            EdgeState::PrerequisiteForThis => (&self.prerequisite_for_color, 1.0),
            EdgeState::Dimmed => (&self.line_color, self.dimmed_opacity),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
