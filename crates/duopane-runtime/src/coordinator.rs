#![forbid(unsafe_code)]

//! Layout coordinator: the façade that turns named intents into store
//! updates.
//!
//! Each intent reads the current state once, computes a full target for
//! both panes, and applies it as a single [`LayoutStore::set_state`] call,
//! so every intent is one merge, one render, and at most one persist.
//!
//! # Persistence Policy
//!
//! | Intent | Persists |
//! |--------|----------|
//! | toggle / maximize / reset | yes |
//! | show / hide auxiliary pane | yes |
//! | drag | once, at gesture end |
//! | device layout: mobile | never |
//! | device layout: desktop | no (re-render or restore only) |
//! | import | yes, on success |

use std::time::Duration;

use duopane_layout::{
    DeviceMode, LayoutConfig, LayoutIntent, LayoutShortcut, LayoutState, PaneId, PanePatch,
    PartialLayoutState, ShowAuxiliaryOptions, FULL_WIDTH,
};

use crate::applier::VisualApplier;
use crate::debounce::ResizeDebouncer;
use crate::drag::{DragController, DragDispatch, PointerButton};
use crate::storage::StorageChannel;
use crate::store::{LayoutStore, SetStateOptions};

/// Owns the store, the drag controller, and the viewport debouncer.
///
/// Construct one per page at the composition root and pass it by reference;
/// there is no global instance.
#[derive(Debug)]
pub struct LayoutCoordinator<S, A> {
    store: LayoutStore<S, A>,
    drag: DragController,
    viewport: ResizeDebouncer,
}

impl<S: StorageChannel, A: VisualApplier> LayoutCoordinator<S, A> {
    pub fn new(config: LayoutConfig, storage: S, applier: A) -> Self {
        let store = LayoutStore::new(config, storage, applier);
        let window = Duration::from_millis(store.config().resize_debounce_ms);
        Self {
            store,
            drag: DragController::new(),
            viewport: ResizeDebouncer::new(window),
        }
    }

    /// Classify the initial viewport and render the loaded state.
    pub fn start(&mut self, viewport_width: f64) -> LayoutState {
        let mode = DeviceMode::classify(viewport_width, self.store.config().mobile_max_width);
        tracing::debug!(
            target: "duopane.coordinator",
            viewport_width,
            mode = %mode,
            "layout coordinator started"
        );
        self.apply_device_layout(mode)
    }

    #[must_use]
    pub fn state(&self) -> LayoutState {
        self.store.state()
    }

    #[must_use]
    pub fn store(&self) -> &LayoutStore<S, A> {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        self.store.config()
    }

    #[must_use]
    pub const fn drag(&self) -> &DragController {
        &self.drag
    }

    #[must_use]
    pub const fn device_mode(&self) -> DeviceMode {
        self.store.device_mode()
    }

    /// Direct merge for callers that compute their own width pair.
    pub fn set_state(
        &mut self,
        partial: &PartialLayoutState,
        options: SetStateOptions,
    ) -> LayoutState {
        tracing::debug!(
            target: "duopane.coordinator",
            intent = "set_state",
            persist = options.persist,
            "applying layout intent"
        );
        self.store.set_state(partial, options)
    }

    /// Apply one named intent.
    pub fn dispatch(&mut self, intent: LayoutIntent) -> LayoutState {
        match intent {
            LayoutIntent::TogglePane { pane } => self.toggle_pane(pane),
            LayoutIntent::MaximizePane { pane } => self.maximize_pane(pane),
            LayoutIntent::ShowAuxiliary { options } => self.show_auxiliary_pane(options),
            LayoutIntent::HideAuxiliary => self.hide_auxiliary_pane(),
            LayoutIntent::ToggleAuxiliary => {
                if self.store.state().pane_b.visible {
                    self.hide_auxiliary_pane()
                } else {
                    self.show_auxiliary_pane(ShowAuxiliaryOptions::REMEMBERED)
                }
            }
            LayoutIntent::Reset => self.reset_layout(),
            LayoutIntent::DeviceLayout { mode } => self.apply_device_layout(mode),
        }
    }

    /// Apply the intent bound to a key chord. `None` when the chord is unbound.
    pub fn handle_shortcut(&mut self, ctrl: bool, key: &str) -> Option<LayoutState> {
        let shortcut = LayoutShortcut::from_key(ctrl, key)?;
        Some(self.dispatch(shortcut.intent()))
    }

    /// Hide a visible pane (the other fills the container), or show a hidden
    /// one at the default width with the other pane taking the complement.
    pub fn toggle_pane(&mut self, id: PaneId) -> LayoutState {
        log_intent(LayoutIntent::TogglePane { pane: id });
        let state = self.store.state();
        let partial = if state.pane(id).visible {
            PartialLayoutState::new()
                .with(id, PanePatch::new().with_visible(false))
                .with(id.other(), PanePatch::full(FULL_WIDTH, true))
        } else {
            let width = self.store.config().default_width;
            PartialLayoutState::new()
                .with(id, PanePatch::full(width, true))
                .with(id.other(), PanePatch::full(FULL_WIDTH - width, true))
        };
        self.store.set_state(&partial, SetStateOptions::PERSIST)
    }

    /// Give `id` the whole container, or reset if it is already maximized.
    pub fn maximize_pane(&mut self, id: PaneId) -> LayoutState {
        log_intent(LayoutIntent::MaximizePane { pane: id });
        let state = self.store.state();
        if state.is_maximized(id, self.store.config().maximize_threshold) {
            return self.store.reset_state();
        }
        let partial = PartialLayoutState::new()
            .with(id, PanePatch::full(FULL_WIDTH, true))
            .with(id.other(), PanePatch::full(0.0, false));
        self.store.set_state(&partial, SetStateOptions::PERSIST)
    }

    /// Show the auxiliary pane at its remembered width (or the default).
    ///
    /// The remembered width is clamped into the configured bounds; a zero
    /// width, left behind by maximizing the primary pane, means "use the
    /// default".
    pub fn show_auxiliary_pane(&mut self, options: ShowAuxiliaryOptions) -> LayoutState {
        log_intent(LayoutIntent::ShowAuxiliary { options });
        let config = self.store.config();
        let remembered = self.store.state().pane_b.width;
        let width = if options.use_default_width || remembered <= 0.0 {
            config.default_width
        } else {
            config.clamp_width(remembered)
        };
        let partial = PartialLayoutState::new()
            .with(PaneId::Auxiliary, PanePatch::full(width, true))
            .with(PaneId::Primary, PanePatch::full(FULL_WIDTH - width, true));
        self.store.set_state(&partial, SetStateOptions::PERSIST)
    }

    /// Hide the auxiliary pane, keeping its width as memory.
    pub fn hide_auxiliary_pane(&mut self) -> LayoutState {
        log_intent(LayoutIntent::HideAuxiliary);
        let partial = PartialLayoutState::new()
            .with(PaneId::Primary, PanePatch::full(FULL_WIDTH, true))
            .with(PaneId::Auxiliary, PanePatch::new().with_visible(false));
        self.store.set_state(&partial, SetStateOptions::PERSIST)
    }

    pub fn reset_layout(&mut self) -> LayoutState {
        log_intent(LayoutIntent::Reset);
        self.store.reset_state()
    }

    /// Switch layout policy for a device class.
    ///
    /// Mobile forces the primary pane full width and hides the auxiliary
    /// pane without persisting. Desktop restores the persisted snapshot when
    /// there is one, otherwise re-renders the in-memory state.
    ///
    /// The pre-mobile split therefore only comes back when storage is
    /// enabled. With storage off, desktop keeps the mobile arrangement.
    pub fn apply_device_layout(&mut self, mode: DeviceMode) -> LayoutState {
        log_intent(LayoutIntent::DeviceLayout { mode });
        self.store.set_device_mode(mode);
        match mode {
            DeviceMode::Mobile => {
                let partial = PartialLayoutState::new()
                    .with(PaneId::Primary, PanePatch::full(FULL_WIDTH, true))
                    .with(PaneId::Auxiliary, PanePatch::new().with_visible(false));
                self.store.set_state(&partial, SetStateOptions::TRANSIENT)
            }
            DeviceMode::Desktop => {
                if !self.store.restore_persisted() {
                    self.store.render();
                }
                self.store.state()
            }
        }
    }

    #[must_use]
    pub fn export_state(&self) -> String {
        self.store.export_state()
    }

    pub fn import_state(&mut self, json: &str) -> bool {
        tracing::debug!(target: "duopane.coordinator", intent = "import", "applying layout intent");
        self.store.import_state(json)
    }

    pub fn pointer_down(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        container_left: f64,
        container_width: f64,
    ) -> DragDispatch {
        self.drag.pointer_down(
            &mut self.store,
            pointer_id,
            button,
            container_left,
            container_width,
        )
    }

    pub fn pointer_move(&mut self, pointer_id: u32, client_x: f64) -> DragDispatch {
        self.drag.pointer_move(&mut self.store, pointer_id, client_x)
    }

    pub fn pointer_up(&mut self, pointer_id: u32) -> DragDispatch {
        self.drag.pointer_up(&mut self.store, pointer_id)
    }

    pub fn pointer_cancel(&mut self, pointer_id: u32) -> DragDispatch {
        self.drag.pointer_cancel(&mut self.store, pointer_id)
    }

    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> DragDispatch {
        self.drag.lost_pointer_capture(&mut self.store, pointer_id)
    }

    pub fn blur(&mut self) -> DragDispatch {
        self.drag.blur(&mut self.store)
    }

    pub fn visibility_hidden(&mut self) -> DragDispatch {
        self.drag.visibility_hidden(&mut self.store)
    }

    /// Record a viewport resize at host time `now`. Reclassification happens
    /// in [`Self::tick`] once the burst settles.
    pub fn viewport_resized(&mut self, now: Duration, viewport_width: f64) {
        self.viewport.push(now, viewport_width);
    }

    /// Advance host time. Returns the new mode if a settled resize changed
    /// the device class (and the device layout was applied).
    pub fn tick(&mut self, now: Duration) -> Option<DeviceMode> {
        let width = self.viewport.poll(now)?;
        let mode = DeviceMode::classify(width, self.store.config().mobile_max_width);
        if mode == self.store.device_mode() {
            return None;
        }
        self.apply_device_layout(mode);
        Some(mode)
    }
}

fn log_intent(intent: LayoutIntent) {
    tracing::debug!(
        target: "duopane.coordinator",
        intent = intent.name(),
        detail = ?intent,
        "applying layout intent"
    );
}
