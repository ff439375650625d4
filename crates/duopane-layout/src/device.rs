//! Device-mode classification from viewport width.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse viewport class that selects the layout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceMode {
    /// Narrow viewport: primary pane only, nothing persisted.
    Mobile,
    /// Two-pane layout.
    #[default]
    Desktop,
}

impl DeviceMode {
    /// Classify a viewport width (CSS px). Non-finite widths classify as desktop.
    #[must_use]
    pub fn classify(viewport_width: f64, mobile_max_width: u32) -> Self {
        if viewport_width.is_finite() && viewport_width <= f64::from(mobile_max_width) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            other => Err(format!("unknown device mode {other:?}")),
        }
    }
}
