use serde::{Deserialize, Serialize};

/// Screen corner the bubble is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    BottomLeft,
    BottomRight,
}

/// Where the play/mute/expand row sits on the expanded surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlsPlacement {
    Top,
    Bottom,
}

/// How switcher buttons are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwitcherLabels {
    Names,
    Ids,
}

/// Width and height in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

/// Geometry and chrome of the bubble surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleLayout {
    pub corner: Corner,
    pub margin: f32,
    pub collapsed: SurfaceSize,
    pub expanded: SurfaceSize,
    pub expanded_radius: f32,
    pub controls: ControlsPlacement,
    pub switcher_labels: SwitcherLabels,
    /// Whether the switcher may be shown on the collapsed bubble.
    pub switcher_while_collapsed: bool,
    /// Whether the expanded surface has a dedicated close button.
    pub close_button: bool,
    /// Whether play/mute controls are drawn on the collapsed bubble.
    pub controls_while_collapsed: bool,
    /// Whether clicking the collapsed bubble expands it.
    pub expand_on_click: bool,
}

const COLLAPSED: SurfaceSize = SurfaceSize {
    width: 256.0,
    height: 256.0,
};

impl BubbleLayout {
    pub fn primary() -> Self {
        Self {
            corner: Corner::BottomRight,
            margin: 16.0,
            collapsed: COLLAPSED,
            expanded: SurfaceSize {
                width: 364.0,
                height: 512.0,
            },
            expanded_radius: 24.0,
            controls: ControlsPlacement::Top,
            switcher_labels: SwitcherLabels::Names,
            switcher_while_collapsed: true,
            close_button: false,
            controls_while_collapsed: true,
            expand_on_click: false,
        }
    }

    pub fn secondary() -> Self {
        Self {
            corner: Corner::BottomLeft,
            margin: 16.0,
            collapsed: COLLAPSED,
            expanded: SurfaceSize {
                width: 364.0,
                height: 640.0,
            },
            expanded_radius: 12.0,
            controls: ControlsPlacement::Bottom,
            switcher_labels: SwitcherLabels::Ids,
            switcher_while_collapsed: false,
            close_button: true,
            controls_while_collapsed: false,
            expand_on_click: true,
        }
    }

    pub fn surface_size(&self, expanded: bool) -> SurfaceSize {
        if expanded { self.expanded } else { self.collapsed }
    }

    /// Corner radius; the collapsed bubble is a full circle.
    pub fn corner_radius(&self, expanded: bool) -> f32 {
        if expanded {
            self.expanded_radius
        } else {
            self.collapsed.width.min(self.collapsed.height) / 2.0
        }
    }

    pub fn controls_visible(&self, expanded: bool) -> bool {
        expanded || self.controls_while_collapsed
    }

    /// Whether the switcher row should be rendered for the given state.
    pub fn switcher_visible(&self, expanded: bool, show_switcher: bool) -> bool {
        show_switcher && (expanded || self.switcher_while_collapsed)
    }
}
