use std::sync::Once;

use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use foldline_connector_core::{
    AnchorPoint, Connector, ConnectorConfig, ConnectorState, DashState, Dispatcher, LayoutSnapshot,
    PathBuilder, RenderSink, RenderUpdate, RevealParams, Signal, SignalQueue, Track,
};

static INIT: Once = Once::new();

fn init_hooks() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        #[cfg(feature = "console_log")]
        {
            if console_log::init_with_level(log::Level::Info).is_err() {
                log::warn!("foldline: a logger was already installed");
            }
        }
    });
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Serialize maps as plain JS objects rather than `Map`s.
fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn parse_layout(layout: JsValue) -> Result<LayoutSnapshot, JsError> {
    if jsvalue_is_undefined_or_null(&layout) {
        return Ok(LayoutSnapshot::default());
    }
    swb::from_value(layout).map_err(|e| JsError::new(&format!("layout error: {e}")))
}

/// Forwards render state to host callbacks:
/// `setPath(track: "background" | "active" | "mask", d: string)` and
/// `setDash(total: number, hidden: number)`.
struct JsRenderer {
    set_path: Function,
    set_dash: Function,
}

impl JsRenderer {
    fn apply(&mut self, update: &RenderUpdate) {
        if update.cleared {
            self.clear();
        }
        if let Some(d) = &update.path {
            for track in Track::ALL {
                self.set_path(track, d);
            }
        }
        if let Some(dash) = update.dash {
            self.set_dash(dash);
        }
    }
}

impl RenderSink for JsRenderer {
    fn set_path(&mut self, track: Track, descriptor: &str) {
        let track = swb::to_value(&track).unwrap_or(JsValue::UNDEFINED);
        if let Err(e) = self
            .set_path
            .call2(&JsValue::UNDEFINED, &track, &JsValue::from_str(descriptor))
        {
            log::warn!("foldline: setPath callback failed: {e:?}");
        }
    }

    fn set_dash(&mut self, dash: DashState) {
        if let Err(e) = self.set_dash.call2(
            &JsValue::UNDEFINED,
            &JsValue::from_f64(dash.total_length),
            &JsValue::from_f64(dash.hidden_length),
        ) {
            log::warn!("foldline: setDash callback failed: {e:?}");
        }
    }

    fn clear(&mut self) {
        for track in Track::ALL {
            self.set_path(track, "");
        }
    }
}

/// Result of one signal, returned to JS.
#[derive(Serialize)]
struct TickOutput {
    #[serde(flatten)]
    update: RenderUpdate,
    /// `false` when the signal was ignored (connector view not shown).
    handled: bool,
    lifecycle: ConnectorState,
}

#[wasm_bindgen]
pub struct FoldlineConnector {
    core: Connector,
    queue: SignalQueue,
    renderer: Option<JsRenderer>,
}

#[wasm_bindgen]
impl FoldlineConnector {
    /// Create a connector. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new FoldlineConnector({ control_offset: 160 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FoldlineConnector, JsError> {
        init_hooks();

        let cfg: ConnectorConfig = if jsvalue_is_undefined_or_null(&config) {
            ConnectorConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = Connector::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;

        Ok(FoldlineConnector {
            core,
            queue: SignalQueue::new(),
            renderer: None,
        })
    }

    /// Register render callbacks. Every subsequent signal writes through them
    /// in addition to returning the update object.
    #[wasm_bindgen(js_name = attach_renderer)]
    pub fn attach_renderer(&mut self, set_path: Function, set_dash: Function) {
        self.renderer = Some(JsRenderer { set_path, set_dash });
    }

    #[wasm_bindgen(js_name = detach_renderer)]
    pub fn detach_renderer(&mut self) {
        self.renderer = None;
    }

    /// Dispatch a signal (`"activated" | "deactivated" | "resize" | "scroll"`)
    /// against a layout snapshot:
    ///   { container: {left, top, width, height} | null, viewport_height, anchors: { id: box } }
    pub fn dispatch(&mut self, signal: JsValue, layout: JsValue) -> Result<JsValue, JsError> {
        let signal: Signal =
            swb::from_value(signal).map_err(|e| JsError::new(&format!("signal error: {e}")))?;
        let layout = parse_layout(layout)?;
        let mut update = RenderUpdate::default();
        let fraction = self.core.handle(signal, &layout, &mut update);
        self.finish(update, fraction)
    }

    /// Queue a signal for the next `flush`; bursts are coalesced.
    pub fn queue(&mut self, signal: JsValue) -> Result<(), JsError> {
        let signal: Signal =
            swb::from_value(signal).map_err(|e| JsError::new(&format!("signal error: {e}")))?;
        self.queue.push(signal);
        Ok(())
    }

    /// Dispatch all queued signals against one layout snapshot (e.g. once per
    /// animation frame).
    pub fn flush(&mut self, layout: JsValue) -> Result<JsValue, JsError> {
        let layout = parse_layout(layout)?;
        let mut update = RenderUpdate::default();
        let fraction = self
            .queue
            .flush(&Dispatcher::DEFAULT, &mut self.core, &layout, &mut update);
        self.finish(update, fraction)
    }

    /// Current lifecycle label as JSON.
    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.state(), "state")
    }

    #[wasm_bindgen(js_name = total_length)]
    pub fn total_length(&self) -> Option<f64> {
        self.core.path().map(|p| p.total_length())
    }

    #[wasm_bindgen(js_name = path_descriptor)]
    pub fn path_descriptor(&self) -> Option<String> {
        self.core.path().map(|p| p.descriptor().to_string())
    }
}

impl FoldlineConnector {
    fn finish(&mut self, mut update: RenderUpdate, fraction: Option<f64>) -> Result<JsValue, JsError> {
        update.fraction = fraction.unwrap_or(0.0);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.apply(&update);
        }
        let out = TickOutput {
            update,
            handled: fraction.is_some(),
            lifecycle: self.core.state(),
        };
        to_js(&out, "outputs")
    }
}

/// Build a connector path from `[{x, y}, ...]` anchors.
/// Returns `{ d, total_length }`, or null when there is nothing to draw.
#[wasm_bindgen(js_name = build_path)]
pub fn build_path(anchors: JsValue, control_offset: Option<f64>) -> Result<JsValue, JsError> {
    #[derive(Serialize)]
    struct Built {
        d: String,
        total_length: f64,
    }

    let anchors: Vec<AnchorPoint> =
        swb::from_value(anchors).map_err(|e| JsError::new(&format!("anchors error: {e}")))?;
    let defaults = ConnectorConfig::default();
    let builder = PathBuilder::new(
        control_offset.unwrap_or(defaults.control_offset),
        defaults.arclen_accuracy,
    );
    match builder.build(&anchors) {
        Some(spec) => to_js(
            &Built {
                d: spec.descriptor().to_string(),
                total_length: spec.total_length(),
            },
            "outputs",
        ),
        None => Ok(JsValue::NULL),
    }
}

/// Reveal fraction in `[0, 1.05]` for the given container/viewport geometry.
#[wasm_bindgen(js_name = compute_reveal)]
pub fn compute_reveal(
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
    total_length: f64,
) -> f64 {
    RevealParams::default().fraction(container_top, container_height, viewport_height, total_length)
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
