//! Layout configuration surface.
//!
//! [`LayoutConfig`] holds every tunable that shapes the layout: width
//! bounds, the default fill width, the maximize boundary, persistence
//! switches, and the compiled fallback state. It can be loaded from TOML or
//! JSON and overlaid from the environment.
//!
//! # Defaults
//!
//! | Field | Default | Effect |
//! |-------|---------|--------|
//! | `min_width` | 10 | Lower clamp for dragged/shown widths |
//! | `max_width` | 90 | Upper clamp for dragged/shown widths |
//! | `default_width` | 50 | Width used when re-showing a pane |
//! | `maximize_threshold` | 95 | Width at which a pane counts as maximized |
//! | `enable_storage` | false | Whether `save_state` writes anywhere |
//! | `storage_key` | `panelLayoutState` | Persistence key |
//! | `default_state` | 60 / 40 | Compiled fallback state |
//! | `resize_debounce_ms` | 250 | Trailing debounce for viewport reclassification |
//! | `mobile_max_width` | 768 | Widest viewport (CSS px) treated as mobile |
//!
//! # Environment Variables
//!
//! | Variable | Type | Description |
//! |----------|------|-------------|
//! | `DUOPANE_ENABLE_STORAGE` | bool | Enable persistence |
//! | `DUOPANE_STORAGE_KEY` | string | Persistence key |
//! | `DUOPANE_RESIZE_DEBOUNCE_MS` | u64 | Viewport debounce window |

#[cfg(feature = "config-files")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::state::{FULL_WIDTH, LayoutState, WIDTH_EPSILON};

pub const DEFAULT_MIN_WIDTH: f64 = 10.0;
pub const DEFAULT_MAX_WIDTH: f64 = 90.0;
pub const DEFAULT_PANE_WIDTH: f64 = 50.0;
pub const DEFAULT_MAXIMIZE_THRESHOLD: f64 = 95.0;
pub const DEFAULT_STORAGE_KEY: &str = "panelLayoutState";
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;
pub const DEFAULT_MOBILE_MAX_WIDTH: u32 = 768;

/// Upper bound for the viewport debounce window.
pub const MAX_RESIZE_DEBOUNCE_MS: u64 = 2_000;

/// Layout tunables. Unset fields fall back to their defaults when decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub min_width: f64,
    pub max_width: f64,
    pub default_width: f64,
    pub maximize_threshold: f64,
    pub enable_storage: bool,
    pub storage_key: String,
    pub default_state: LayoutState,
    pub resize_debounce_ms: u64,
    pub mobile_max_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            default_width: DEFAULT_PANE_WIDTH,
            maximize_threshold: DEFAULT_MAXIMIZE_THRESHOLD,
            enable_storage: false,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            default_state: LayoutState::default(),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            mobile_max_width: DEFAULT_MOBILE_MAX_WIDTH,
        }
    }
}

impl LayoutConfig {
    /// Enable or disable persistence (builder pattern).
    #[must_use]
    pub fn with_storage(mut self, enabled: bool) -> Self {
        self.enable_storage = enabled;
        self
    }

    /// Set the persistence key (builder pattern).
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the width bounds (builder pattern).
    #[must_use]
    pub fn with_bounds(mut self, min_width: f64, max_width: f64) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    /// Set the compiled fallback state (builder pattern).
    #[must_use]
    pub fn with_default_state(mut self, state: LayoutState) -> Self {
        self.default_state = state;
        self
    }

    /// Default config overlaid with `DUOPANE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().overlay_env(|name| std::env::var(name).ok())
    }

    /// Overlay values produced by `lookup` for the `DUOPANE_*` variables.
    ///
    /// Unparseable values are ignored. The result is validated.
    #[must_use]
    pub fn overlay_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("DUOPANE_ENABLE_STORAGE") {
            self.enable_storage = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Some(val) = lookup("DUOPANE_STORAGE_KEY")
            && !val.trim().is_empty()
        {
            self.storage_key = val.trim().to_owned();
        }
        if let Some(val) = lookup("DUOPANE_RESIZE_DEBOUNCE_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            self.resize_debounce_ms = ms;
        }
        self.validated()
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, LayoutConfigError> {
        let config: Self = toml::from_str(s).map_err(LayoutConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LayoutConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LayoutConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, LayoutConfigError> {
        let config: Self = serde_json::from_str(s).map_err(LayoutConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, LayoutConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LayoutConfigError::Io)?;
        Self::from_json_str(&content)
    }

    fn checked(self) -> Result<Self, LayoutConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(LayoutConfigError::Validation(errors))
        }
    }

    /// List every violated constraint. Empty means the config is usable as is.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let finite = [
            ("min_width", self.min_width),
            ("max_width", self.max_width),
            ("default_width", self.default_width),
            ("maximize_threshold", self.maximize_threshold),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            }
        }
        if !errors.is_empty() {
            return errors;
        }

        if !(0.0 <= self.min_width && self.min_width < self.max_width && self.max_width <= FULL_WIDTH)
        {
            errors.push(format!(
                "width bounds must satisfy 0 <= min_width < max_width <= 100, got {}..{}",
                self.min_width, self.max_width
            ));
        }
        if !(self.min_width..=self.max_width).contains(&self.default_width) {
            errors.push(format!(
                "default_width must lie in [{}, {}], got {}",
                self.min_width, self.max_width, self.default_width
            ));
        }
        if !(self.maximize_threshold > self.max_width || self.max_width >= FULL_WIDTH)
            || self.maximize_threshold > FULL_WIDTH
        {
            errors.push(format!(
                "maximize_threshold must lie in ({}, 100], got {}",
                self.max_width, self.maximize_threshold
            ));
        }
        if self.storage_key.trim().is_empty() {
            errors.push("storage_key must not be empty".into());
        }
        if let Err(e) = self.default_state.validate() {
            errors.push(format!("default_state is invalid: {e}"));
        } else if !self.default_state.pane_a.visible && !self.default_state.pane_b.visible {
            errors.push("default_state must keep at least one pane visible".into());
        } else if self.default_state.both_visible()
            && (self.default_state.visible_width_sum() - FULL_WIDTH).abs() > WIDTH_EPSILON
        {
            errors.push(format!(
                "default_state widths must sum to 100 when both panes are visible, got {}",
                self.default_state.visible_width_sum()
            ));
        }
        if self.resize_debounce_ms > MAX_RESIZE_DEBOUNCE_MS {
            errors.push(format!(
                "resize_debounce_ms must be <= {MAX_RESIZE_DEBOUNCE_MS}, got {}",
                self.resize_debounce_ms
            ));
        }

        errors
    }

    /// Return a copy with every field forced into a usable range.
    ///
    /// Invalid bounds fall back to the defaults as a pair, the default width
    /// and threshold are clamped against the resulting bounds, and an
    /// invalid fallback state is replaced by the built-in one.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let bounds_ok = self.min_width.is_finite()
            && self.max_width.is_finite()
            && 0.0 <= self.min_width
            && self.min_width < self.max_width
            && self.max_width <= FULL_WIDTH;
        if !bounds_ok {
            self.min_width = DEFAULT_MIN_WIDTH;
            self.max_width = DEFAULT_MAX_WIDTH;
        }

        self.default_width = if self.default_width.is_finite() {
            self.default_width.clamp(self.min_width, self.max_width)
        } else {
            DEFAULT_PANE_WIDTH.clamp(self.min_width, self.max_width)
        };

        let threshold_ok = self.maximize_threshold.is_finite()
            && self.maximize_threshold <= FULL_WIDTH
            && (self.maximize_threshold > self.max_width || self.max_width >= FULL_WIDTH);
        if !threshold_ok {
            self.maximize_threshold = (self.max_width + FULL_WIDTH) / 2.0;
        }

        if self.storage_key.trim().is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_owned();
        }

        let state = self.default_state;
        let state_ok = state.validate().is_ok()
            && (state.pane_a.visible || state.pane_b.visible)
            && (!state.both_visible()
                || (state.visible_width_sum() - FULL_WIDTH).abs() <= WIDTH_EPSILON);
        if !state_ok {
            self.default_state = LayoutState::default();
        }

        self.resize_debounce_ms = self.resize_debounce_ms.min(MAX_RESIZE_DEBOUNCE_MS);
        self
    }

    /// Clamp a proposed width into `[min_width, max_width]`.
    #[must_use]
    pub fn clamp_width(&self, width: f64) -> f64 {
        width.clamp(self.min_width, self.max_width)
    }
}

/// Errors that can occur when loading a layout configuration.
#[derive(Debug)]
pub enum LayoutConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-files")]
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for LayoutConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
