//! WASM bindings for Pinsim Core.
//!
//! This module exposes the workbench to the browser page. Toasts and status
//! refreshes are delivered through JavaScript callbacks, and the simulation
//! tick is driven by `window.setInterval`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmWorkbench } from 'pinsim_core';
//!
//! await init();
//!
//! const bench = new WasmWorkbench(
//!   (message, severity) => showToast(message, severity),
//!   (statusHtml) => { statusContent.innerHTML = statusHtml; },
//!   (sketch) => { codeOutput.textContent = sketch; },
//! );
//!
//! const board = bench.place('board', 40, 40);
//! const led = bench.place('led', 220, 40);
//! const button = bench.place('button', 220, 160);
//!
//! if (bench.start()) {
//!   buttonEl.onmousedown = () => bench.set_pressed(button, true);
//!   window.onmouseup = () => bench.set_pressed(button, false);
//! }
//! ```
//!
//! Callbacks run while the workbench is borrowed; they receive everything
//! they need as arguments and must not call back into the workbench.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::circuit::{ComponentId, ComponentKind, Position};
use crate::engine::{Status, Timer, TimerHandle};
use crate::error::{Result, SimError};
use crate::workbench::{Frontend, Toast, Workbench};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

type SharedWorkbench = Rc<RefCell<Workbench<IntervalTimer>>>;

/// A [`Timer`] backed by `window.setInterval`.
///
/// Holds a weak reference to the workbench it ticks, so dropping the
/// workbench also clears its intervals.
pub struct IntervalTimer {
    target: Weak<RefCell<Workbench<IntervalTimer>>>,
    /// Live intervals: browser handle and the callback it keeps alive
    active: HashMap<TimerHandle, (i32, Closure<dyn FnMut()>)>,
    next_handle: u32,
}

impl IntervalTimer {
    fn new(target: Weak<RefCell<Workbench<IntervalTimer>>>) -> Self {
        Self {
            target,
            active: HashMap::new(),
            next_handle: 0,
        }
    }
}

impl Timer for IntervalTimer {
    fn schedule(&mut self, period: Duration) -> Result<TimerHandle> {
        let window = web_sys::window().ok_or_else(|| SimError::timer("no global window"))?;

        let target = self.target.clone();
        let callback = Closure::wrap(Box::new(move || {
            let Some(workbench) = target.upgrade() else {
                return;
            };
            // Already borrowed means a JS callback re-entered; skip this beat.
            if let Ok(mut workbench) = workbench.try_borrow_mut() {
                workbench.tick();
            };
        }) as Box<dyn FnMut()>);

        let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        let interval = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(|e| SimError::timer(format!("{e:?}")))?;

        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.active.insert(handle, (interval, callback));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some((interval, _callback)) = self.active.remove(&handle) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(interval);
            }
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            for (interval, _) in self.active.values() {
                window.clear_interval_with_handle(*interval);
            }
        }
    }
}

/// A [`Frontend`] forwarding to JavaScript callbacks.
struct JsFrontend {
    /// `(message, severity) => void`
    on_toast: Option<js_sys::Function>,
    /// `(statusHtml) => void`
    on_status: Option<js_sys::Function>,
    /// `(sketch) => void`
    on_code: Option<js_sys::Function>,
}

impl Frontend for JsFrontend {
    fn toast(&mut self, toast: &Toast) {
        if let Some(f) = &self.on_toast {
            let message = JsValue::from_str(&toast.message);
            let severity = JsValue::from_str(toast.severity.as_str());
            if let Err(e) = f.call2(&JsValue::NULL, &message, &severity) {
                warn!(error = ?e, "toast callback failed");
            }
        }
    }

    fn status_changed(&mut self, status: &Status) {
        if let Some(f) = &self.on_status {
            if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_str(&status.to_html())) {
                warn!(error = ?e, "status callback failed");
            }
        }
    }

    fn code_changed(&mut self, sketch: &str) {
        if let Some(f) = &self.on_code {
            if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_str(sketch)) {
                warn!(error = ?e, "code callback failed");
            }
        }
    }
}

fn to_js(e: SimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Browser-facing workbench.
///
/// Wraps a [`Workbench`] ticked by `setInterval`. A rejected action throws
/// after its toast has been delivered.
#[wasm_bindgen]
pub struct WasmWorkbench {
    inner: SharedWorkbench,
}

#[wasm_bindgen]
impl WasmWorkbench {
    /// Create an empty workbench.
    ///
    /// # Arguments
    /// * `on_toast` - Called as `on_toast(message, severity)`
    /// * `on_status` - Called as `on_status(statusHtml)` after every change
    /// * `on_code` - Called as `on_code(sketch)` when the code panel should update
    #[wasm_bindgen(constructor)]
    pub fn new(
        on_toast: Option<js_sys::Function>,
        on_status: Option<js_sys::Function>,
        on_code: Option<js_sys::Function>,
    ) -> WasmWorkbench {
        let frontend = JsFrontend {
            on_toast,
            on_status,
            on_code,
        };
        let inner = Rc::new_cyclic(|weak| {
            RefCell::new(Workbench::new(IntervalTimer::new(weak.clone()), Box::new(frontend)))
        });
        WasmWorkbench { inner }
    }

    /// Place a component (`"board"`, `"led"` or `"button"`) and return its id.
    #[wasm_bindgen]
    pub fn place(&self, kind: &str, x: f64, y: f64) -> std::result::Result<u32, JsValue> {
        let kind = ComponentKind::from_str(kind)
            .ok_or_else(|| JsValue::from_str(&format!("unknown component kind '{kind}'")))?;
        let id = self.with(|wb| wb.place(kind, Position::new(x, y)))?;
        u32::try_from(id.0).map_err(|_| JsValue::from_str("component id overflow"))
    }

    /// Remove a component. Returns `false` for unknown ids.
    #[wasm_bindgen]
    pub fn remove(&self, id: u32) -> std::result::Result<bool, JsValue> {
        self.with(|wb| Ok(wb.remove(ComponentId(id as usize))))
    }

    /// Move an LED or button to another pin.
    #[wasm_bindgen]
    pub fn change_pin(&self, id: u32, pin: u8) -> std::result::Result<(), JsValue> {
        self.with(|wb| wb.change_pin(ComponentId(id as usize), pin))
    }

    /// Press or release a button.
    #[wasm_bindgen]
    pub fn set_pressed(&self, id: u32, pressed: bool) -> std::result::Result<(), JsValue> {
        self.with(|wb| wb.set_pressed(ComponentId(id as usize), pressed))
    }

    /// Record a drag to a new canvas position.
    #[wasm_bindgen]
    pub fn move_component(&self, id: u32, x: f64, y: f64) -> std::result::Result<(), JsValue> {
        self.with(|wb| wb.move_component(ComponentId(id as usize), Position::new(x, y)))
    }

    /// Remove every component.
    #[wasm_bindgen]
    pub fn clear(&self) -> std::result::Result<(), JsValue> {
        self.with(|wb| {
            wb.clear();
            Ok(())
        })
    }

    /// Start the simulation. Returns `false` if the circuit was rejected.
    #[wasm_bindgen]
    pub fn start(&self) -> std::result::Result<bool, JsValue> {
        self.with(|wb| Ok(wb.start().is_ok()))
    }

    /// Stop the simulation. Returns `false` if it was not running.
    #[wasm_bindgen]
    pub fn stop(&self) -> std::result::Result<bool, JsValue> {
        self.with(|wb| Ok(wb.stop()))
    }

    /// Whether the simulation is running.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner
            .try_borrow()
            .map(|wb| wb.engine().is_running())
            .unwrap_or(false)
    }

    /// Status panel markup.
    #[wasm_bindgen]
    pub fn status_html(&self) -> std::result::Result<String, JsValue> {
        self.read(|wb| wb.status().to_html())
    }

    /// Generate the Arduino sketch for the current circuit.
    #[wasm_bindgen]
    pub fn generate_code(&self) -> std::result::Result<String, JsValue> {
        self.with(|wb| Ok(wb.generate_code()))
    }

    /// Pins selectable for a component in its pin menu.
    #[wasm_bindgen]
    pub fn available_pins(&self, id: u32) -> std::result::Result<Vec<u8>, JsValue> {
        self.read(|wb| {
            wb.registry()
                .available_pins(ComponentId(id as usize))
                .into_iter()
                .map(|p| p.number())
                .collect()
        })
    }

    fn with<R>(
        &self,
        f: impl FnOnce(&mut Workbench<IntervalTimer>) -> Result<R>,
    ) -> std::result::Result<R, JsValue> {
        let mut wb = self.inner.try_borrow_mut().map_err(|_| {
            to_js(SimError::WasmError {
                message: "workbench is busy (called from inside a callback?)".to_string(),
            })
        })?;
        f(&mut wb).map_err(to_js)
    }

    fn read<R>(&self, f: impl FnOnce(&Workbench<IntervalTimer>) -> R) -> std::result::Result<R, JsValue> {
        let wb = self.inner.try_borrow().map_err(|_| {
            to_js(SimError::WasmError {
                message: "workbench is busy (called from inside a callback?)".to_string(),
            })
        })?;
        Ok(f(&wb))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the tick period in milliseconds.
#[wasm_bindgen]
pub fn tick_interval_ms() -> u32 {
    crate::engine::TICK_INTERVAL_MS as u32
}
