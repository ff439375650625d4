//! Pointer-to-width geometry for the resize handle.

use crate::config::LayoutConfig;
use crate::state::{FULL_WIDTH, LayoutState};

/// Horizontal extent of the pane container, captured at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    left: f64,
    width: f64,
}

impl ContainerBounds {
    /// Returns `None` for degenerate geometry (non-finite or zero width).
    #[must_use]
    pub fn new(left: f64, width: f64) -> Option<Self> {
        (left.is_finite() && width.is_finite() && width > 0.0).then_some(Self { left, width })
    }

    #[must_use]
    pub const fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Raw (unclamped) percentage of the container left of `client_x`.
    #[must_use]
    pub fn percentage_at(&self, client_x: f64) -> Option<f64> {
        client_x
            .is_finite()
            .then(|| (client_x - self.left) / self.width * FULL_WIDTH)
    }
}

/// Both-visible state for a raw pointer percentage, clamped to the
/// configured bounds. The primary pane takes the clamped value and the
/// auxiliary pane its complement.
#[must_use]
pub fn drag_proposal(raw_percentage: f64, config: &LayoutConfig) -> LayoutState {
    LayoutState::split(config.clamp_width(raw_percentage))
}
