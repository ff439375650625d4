#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the DuoPane layout.
//!
//! [`DuoPaneLayout`] wraps a [`LayoutCoordinator`] wired to the live DOM and
//! `localStorage`. The page's JS glue forwards pointer, keyboard, viewport
//! and control-click events; every method is total and never throws.
//! Only compiled on `wasm32` targets.

use js_sys::{JSON, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Storage};

use duopane_layout::{ControlAffordances, LayoutIntent, LayoutState, PaneId, ShowAuxiliaryOptions};
use duopane_runtime::{
    DragDispatch, LayoutCoordinator, PointerButton, StorageChannel, StorageError, VisualApplier,
};

use crate::host_core::{
    DRAGGING_CLASS, DomSelectors, DragDispatchView, HostOptions, NO_TRANSITION_CLASS,
    PANE_HIDDEN_CLASS, RESIZER_HIDDEN_CLASS, control_selector, host_time, pane_styles,
    parse_partial_state, set_state_options, storage_write_error,
};

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|idx| nodes.get(idx))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown JS error".to_owned())
}

/// [`VisualApplier`] that writes pane widths and classes into the DOM.
#[derive(Debug)]
pub struct DomApplier {
    selectors: DomSelectors,
}

impl DomApplier {
    #[must_use]
    pub fn new(selectors: DomSelectors) -> Self {
        Self { selectors }
    }

    fn missing(&self, selector: &str) {
        tracing::warn!(target: "duopane.web", selector = %selector, "presentation target missing");
    }
}

impl VisualApplier for DomApplier {
    fn apply_visual_state(&mut self, state: &LayoutState) -> bool {
        let Some(document) = document() else {
            tracing::warn!(target: "duopane.web", "no document, skipping render");
            return false;
        };
        let mut complete = true;
        for (id, style) in PaneId::ALL.into_iter().zip(pane_styles(state)) {
            let selector = self.selectors.pane(id);
            let Some(element) = query(&document, selector) else {
                self.missing(selector);
                complete = false;
                continue;
            };
            toggle_class(&element, PANE_HIDDEN_CLASS, style.hidden);
            if let Ok(html) = element.dyn_into::<HtmlElement>() {
                let _ = html.style().set_property("flex-basis", &style.flex_basis);
            }
        }
        match query(&document, &self.selectors.resizer) {
            Some(resizer) => toggle_class(&resizer, RESIZER_HIDDEN_CLASS, !state.both_visible()),
            None => {
                self.missing(&self.selectors.resizer);
                complete = false;
            }
        }
        complete
    }

    fn update_control_affordances(&mut self, affordances: &ControlAffordances) {
        let Some(document) = document() else {
            return;
        };
        for id in PaneId::ALL {
            let pane = affordances.pane(id);
            for button in query_all_html(&document, &control_selector("toggle", Some(id))) {
                button.set_text_content(Some(pane.toggle.label()));
            }
            for button in query_all_html(&document, &control_selector("maximize", Some(id))) {
                button.set_text_content(Some(pane.maximize.label()));
            }
        }
        let display = if affordances.show_auxiliary_button {
            ""
        } else {
            "none"
        };
        for button in query_all_html(&document, &self.selectors.auxiliary_button) {
            let _ = button.style().set_property("display", display);
        }
    }

    fn set_drag_feedback(&mut self, active: bool) {
        let Some(document) = document() else {
            return;
        };
        if let Some(container) = query(&document, &self.selectors.container) {
            toggle_class(&container, NO_TRANSITION_CLASS, active);
        }
        if let Some(body) = document.body() {
            toggle_class(&body, DRAGGING_CLASS, active);
        }
    }
}

/// [`StorageChannel`] over `window.localStorage`.
#[derive(Debug)]
pub struct LocalStorageChannel {
    storage: Option<Storage>,
}

impl LocalStorageChannel {
    /// Bind to `localStorage`. Private browsing modes may deny access; the
    /// channel then reports every call as unavailable.
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".into()))
    }
}

impl Default for LocalStorageChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageChannel for LocalStorageChannel {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(js_error(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| {
                let name = Reflect::get(&e, &JsValue::from_str("name"))
                    .ok()
                    .and_then(|n| n.as_string());
                storage_write_error(name.as_deref(), js_error(&e), key, value.len())
            })
    }
}

/// JS-facing layout controller.
#[wasm_bindgen]
pub struct DuoPaneLayout {
    inner: LayoutCoordinator<LocalStorageChannel, DomApplier>,
    container: String,
}

impl DuoPaneLayout {
    fn state_value(state: LayoutState) -> JsValue {
        state
            .to_json()
            .ok()
            .and_then(|json| JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL)
    }

    fn dispatch_value(dispatch: &DragDispatch) -> JsValue {
        serde_json::to_string(&DragDispatchView::from(dispatch))
            .ok()
            .and_then(|json| JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL)
    }

    fn pane_or_log(pane: &str) -> Option<PaneId> {
        match pane.parse::<PaneId>() {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(target: "duopane.web", error = %error, "ignoring layout call");
                None
            }
        }
    }

    fn container_bounds(&self) -> (f64, f64) {
        document()
            .and_then(|document| query(&document, &self.container))
            .map(|element| {
                let rect = element.get_bounding_client_rect();
                (rect.left(), rect.width())
            })
            .unwrap_or((0.0, 0.0))
    }
}

#[wasm_bindgen]
impl DuoPaneLayout {
    /// Create a controller. `options` is a JSON string (see `HostOptions`);
    /// omit it for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<DuoPaneLayout, JsValue> {
        let options = HostOptions::from_json(options.as_deref().unwrap_or_default())
            .map_err(|e| JsValue::from_str(&e))?;
        let container = options.selectors.container.clone();
        let inner = LayoutCoordinator::new(
            options.config,
            LocalStorageChannel::new(),
            DomApplier::new(options.selectors),
        );
        Ok(Self { inner, container })
    }

    /// Classify the viewport and render the initial layout.
    pub fn start(&mut self, viewport_width: f64) -> JsValue {
        Self::state_value(self.inner.start(viewport_width))
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        Self::state_value(self.inner.state())
    }

    /// Merge a partial state (JSON). `persist` defaults to `true`.
    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&mut self, partial: &str, persist: Option<bool>) -> JsValue {
        match parse_partial_state(partial) {
            Ok(partial) => {
                Self::state_value(self.inner.set_state(&partial, set_state_options(persist)))
            }
            Err(error) => {
                tracing::warn!(target: "duopane.web", error = %error, "setState payload rejected");
                self.get_state()
            }
        }
    }

    #[wasm_bindgen(js_name = resetLayout)]
    pub fn reset_layout(&mut self) -> JsValue {
        Self::state_value(self.inner.reset_layout())
    }

    #[wasm_bindgen(js_name = togglePane)]
    pub fn toggle_pane(&mut self, pane: &str) -> JsValue {
        match Self::pane_or_log(pane) {
            Some(id) => Self::state_value(self.inner.toggle_pane(id)),
            None => self.get_state(),
        }
    }

    #[wasm_bindgen(js_name = maximizePane)]
    pub fn maximize_pane(&mut self, pane: &str) -> JsValue {
        match Self::pane_or_log(pane) {
            Some(id) => Self::state_value(self.inner.maximize_pane(id)),
            None => self.get_state(),
        }
    }

    #[wasm_bindgen(js_name = showAuxiliaryPane)]
    pub fn show_auxiliary_pane(&mut self, use_default_width: Option<bool>) -> JsValue {
        let options = ShowAuxiliaryOptions {
            use_default_width: use_default_width.unwrap_or(false),
        };
        Self::state_value(self.inner.show_auxiliary_pane(options))
    }

    #[wasm_bindgen(js_name = hideAuxiliaryPane)]
    pub fn hide_auxiliary_pane(&mut self) -> JsValue {
        Self::state_value(self.inner.hide_auxiliary_pane())
    }

    #[wasm_bindgen(js_name = exportState)]
    pub fn export_state(&self) -> String {
        self.inner.export_state()
    }

    #[wasm_bindgen(js_name = importState)]
    pub fn import_state(&mut self, json: &str) -> bool {
        self.inner.import_state(json)
    }

    /// Handle a click on a control carrying `data-intent`/`data-pane`.
    /// Returns `false` when the payload names no known intent.
    pub fn control(&mut self, intent: &str, pane: Option<String>) -> bool {
        match LayoutIntent::from_control(intent, pane.as_deref()) {
            Some(intent) => {
                self.inner.dispatch(intent);
                true
            }
            None => {
                tracing::warn!(target: "duopane.web", intent = %intent, "unknown control payload");
                false
            }
        }
    }

    /// Handle a keydown. Returns `true` when the chord was consumed and the
    /// host should call `preventDefault()`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, ctrl: bool, key: &str) -> bool {
        self.inner.handle_shortcut(ctrl, key).is_some()
    }

    /// Pointer-down on the resize handle. Reads the container geometry from
    /// the DOM at the moment of the press.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, pointer_id: u32, button: i16) -> JsValue {
        let (left, width) = self.container_bounds();
        let dispatch =
            self.inner
                .pointer_down(pointer_id, PointerButton::from_dom(button), left, width);
        Self::dispatch_value(&dispatch)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, pointer_id: u32, client_x: f64) -> JsValue {
        Self::dispatch_value(&self.inner.pointer_move(pointer_id, client_x))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, pointer_id: u32) -> JsValue {
        Self::dispatch_value(&self.inner.pointer_up(pointer_id))
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, pointer_id: u32) -> JsValue {
        Self::dispatch_value(&self.inner.pointer_cancel(pointer_id))
    }

    #[wasm_bindgen(js_name = lostPointerCapture)]
    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> JsValue {
        Self::dispatch_value(&self.inner.lost_pointer_capture(pointer_id))
    }

    pub fn blur(&mut self) -> JsValue {
        Self::dispatch_value(&self.inner.blur())
    }

    #[wasm_bindgen(js_name = visibilityHidden)]
    pub fn visibility_hidden(&mut self) -> JsValue {
        Self::dispatch_value(&self.inner.visibility_hidden())
    }

    /// Record a viewport resize; `now_ms` is `performance.now()`.
    #[wasm_bindgen(js_name = viewportResized)]
    pub fn viewport_resized(&mut self, now_ms: f64, viewport_width: f64) {
        self.inner
            .viewport_resized(host_time(now_ms), viewport_width);
    }

    /// Advance host time. Returns `"mobile"`/`"desktop"` when a settled
    /// resize switched the device layout.
    pub fn tick(&mut self, now_ms: f64) -> Option<String> {
        self.inner
            .tick(host_time(now_ms))
            .map(|mode| mode.as_str().to_owned())
    }

    #[wasm_bindgen(js_name = deviceMode)]
    pub fn device_mode(&self) -> String {
        self.inner.device_mode().as_str().to_owned()
    }
}
