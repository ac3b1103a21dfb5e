//! foldline-site-wasm: thin wasm-bindgen wrapper over foldline-site-core.
//! Timers, DOM writes and the classifier stay in JS; every call returns plain
//! JSON describing what the page should do next.

use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use foldline_site_core::{AiLab, LandingPlayer, Prediction, SiteConfig, TabBar, Verdict};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

/// Verdict flattened with its presentation strings.
#[derive(Serialize)]
struct VerdictView<'a> {
    #[serde(flatten)]
    verdict: &'a Verdict,
    message: String,
    color: &'static str,
    confidence_text: String,
    bar_width_pct: f64,
}

impl<'a> From<&'a Verdict> for VerdictView<'a> {
    fn from(verdict: &'a Verdict) -> Self {
        Self {
            verdict,
            message: verdict.message(),
            color: verdict.color(),
            confidence_text: verdict.confidence_text(),
            bar_width_pct: verdict.bar_width_pct(),
        }
    }
}

#[wasm_bindgen]
pub struct FoldlineSite {
    cfg: SiteConfig,
    landing: LandingPlayer,
    tabs: TabBar,
    lab: AiLab,
}

#[wasm_bindgen]
impl FoldlineSite {
    /// Create the site controller. Pass a JSON config object or undefined/null for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FoldlineSite, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let cfg: SiteConfig = if jsvalue_is_undefined_or_null(&config) {
            SiteConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        cfg.validate()
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;

        Ok(FoldlineSite {
            landing: LandingPlayer::new(&cfg),
            tabs: TabBar::new(&cfg),
            lab: AiLab::new(&cfg),
            cfg,
        })
    }

    /// Advance the landing sequence by `dt_ms`; returns the actions crossed.
    #[wasm_bindgen(js_name = landing_update)]
    pub fn landing_update(&mut self, dt_ms: f64) -> Result<JsValue, JsError> {
        to_js(&self.landing.update(dt_ms), "landing")
    }

    #[wasm_bindgen(js_name = landing_skip)]
    pub fn landing_skip(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.landing.skip(), "landing")
    }

    #[wasm_bindgen(js_name = landing_finished)]
    pub fn landing_finished(&self) -> bool {
        self.landing.is_finished()
    }

    #[wasm_bindgen(js_name = typed_text)]
    pub fn typed_text(&self) -> String {
        self.landing.typed_text().to_string()
    }

    /// Show tab `tab` (1-based). Returns the effects object, including the
    /// connector signal to forward to `FoldlineConnector.dispatch`.
    #[wasm_bindgen(js_name = show_tab)]
    pub fn show_tab(&mut self, tab: usize) -> Result<JsValue, JsError> {
        let fx = self
            .tabs
            .show(tab)
            .map_err(|e| JsError::new(&format!("show_tab: {e}")))?;
        to_js(&fx, "tab")
    }

    #[wasm_bindgen(js_name = go_to_demo_step)]
    pub fn go_to_demo_step(&mut self, step: usize) -> Result<JsValue, JsError> {
        let fx = self
            .tabs
            .go_to_demo_step(step)
            .map_err(|e| JsError::new(&format!("go_to_demo_step: {e}")))?;
        to_js(&fx, "tab")
    }

    /// Select an AI-lab category; returns its guide text.
    #[wasm_bindgen(js_name = select_category)]
    pub fn select_category(&mut self, id: &str) -> Result<String, JsError> {
        self.lab
            .select_category(id)
            .map(str::to_string)
            .map_err(|e| JsError::new(&format!("select_category: {e}")))
    }

    #[wasm_bindgen(js_name = mark_model_ready)]
    pub fn mark_model_ready(&mut self) {
        self.lab.mark_model_ready();
    }

    #[wasm_bindgen(js_name = begin_upload)]
    pub fn begin_upload(&mut self) -> Result<f64, JsError> {
        self.lab
            .begin_upload()
            .map_err(|e| JsError::new(&format!("begin_upload: {e}")))?;
        Ok(self.cfg.classify_delay_ms)
    }

    /// Apply `[{ label, confidence }]` classifier output. Returns the verdict
    /// with its message, color and percentage text.
    pub fn classify(&mut self, predictions: JsValue) -> Result<JsValue, JsError> {
        let preds: Vec<Prediction> = swb::from_value(predictions)
            .map_err(|e| JsError::new(&format!("predictions error: {e}")))?;
        let verdict = self
            .lab
            .classify(&preds)
            .map_err(|e| JsError::new(&format!("classify: {e}")))?;
        to_js(&VerdictView::from(&verdict), "verdict")
    }

    #[wasm_bindgen(js_name = classification_failed)]
    pub fn classification_failed(&mut self, message: &str) {
        self.lab.classification_failed(message);
    }

    #[wasm_bindgen(js_name = lab_phase)]
    pub fn lab_phase(&self) -> Result<JsValue, JsError> {
        to_js(self.lab.phase(), "lab")
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
