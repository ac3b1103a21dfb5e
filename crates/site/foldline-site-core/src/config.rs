//! Site configuration: landing timings, tabs and AI-lab categories.

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Delays (milliseconds) between landing cues.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingTimings {
    /// Before the container expands.
    pub expand_after_ms: f64,
    /// From expansion to the first typed character.
    pub typing_after_ms: f64,
    /// Per typed character.
    pub char_ms: f64,
    /// From the last character until the slogan fades.
    pub hide_after_ms: f64,
    pub collapse_after_ms: f64,
    pub orange_after_ms: f64,
    pub fade_after_ms: f64,
    /// From landing fade to swapping in the main page.
    pub show_main_after_ms: f64,
    /// From showing the main page to making it opaque and scrollable.
    pub reveal_main_after_ms: f64,
}

impl Default for LandingTimings {
    fn default() -> Self {
        Self {
            expand_after_ms: 700.0,
            typing_after_ms: 500.0,
            char_ms: 45.0,
            hide_after_ms: 500.0,
            collapse_after_ms: 300.0,
            orange_after_ms: 700.0,
            fade_after_ms: 1200.0,
            show_main_after_ms: 800.0,
            reveal_main_after_ms: 50.0,
        }
    }
}

/// Labels accepted for one AI-lab category, plus the hint shown on selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub id: String,
    pub labels: Vec<String>,
    pub guide: String,
}

impl CategoryRule {
    pub fn new(id: &str, labels: &[&str], guide: &str) -> Self {
        Self {
            id: id.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            guide: guide.to_string(),
        }
    }

    pub fn accepts(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub slogan: String,
    pub landing: LandingTimings,
    /// Number of tabs (1-based ids).
    pub tab_count: usize,
    /// Tab that hosts the connector line.
    pub connector_tab: usize,
    /// Delay before measuring the connector after its tab is shown, so the
    /// layout has settled.
    pub connector_settle_ms: f64,
    /// Number of `demo-step-N` targets on the connector tab.
    pub demo_steps: usize,
    pub categories: Vec<CategoryRule>,
    /// Classifier label meaning "nothing recognisable in frame".
    pub background_label: String,
    /// Delay between a finished upload and classification.
    pub classify_delay_ms: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            slogan: "Fold what you want, make it yours".to_string(),
            landing: LandingTimings::default(),
            tab_count: 3,
            connector_tab: 2,
            connector_settle_ms: 100.0,
            demo_steps: 3,
            categories: vec![
                CategoryRule::new(
                    "fruit",
                    &["Apple", "Banana", "Orange"],
                    "🍎 가이드: 사과 또는 바나나를 접어 보세요.",
                ),
                CategoryRule::new(
                    "animal",
                    &["Cat", "Dog", "Bird"],
                    "🦊 가이드: 새 또는 고양이를 접어 보세요.",
                ),
            ],
            background_label: "Background".to_string(),
            classify_delay_ms: 500.0,
        }
    }
}

impl SiteConfig {
    pub fn from_json_str(s: &str) -> Result<Self, SiteError> {
        let cfg: SiteConfig =
            serde_json::from_str(s).map_err(|e| SiteError::ConfigParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        if self.tab_count == 0 {
            return Err(SiteError::InvalidConfig("tab_count must be at least 1".into()));
        }
        if self.connector_tab == 0 || self.connector_tab > self.tab_count {
            return Err(SiteError::InvalidConfig(format!(
                "connector_tab {} outside 1..={}",
                self.connector_tab, self.tab_count
            )));
        }
        let t = &self.landing;
        let delays = [
            t.expand_after_ms,
            t.typing_after_ms,
            t.char_ms,
            t.hide_after_ms,
            t.collapse_after_ms,
            t.orange_after_ms,
            t.fade_after_ms,
            t.show_main_after_ms,
            t.reveal_main_after_ms,
            self.connector_settle_ms,
            self.classify_delay_ms,
        ];
        if delays.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(SiteError::InvalidConfig(
                "delays must be finite and non-negative".into(),
            ));
        }
        for (i, rule) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|r| r.id == rule.id) {
                return Err(SiteError::InvalidConfig(format!(
                    "duplicate category '{}'",
                    rule.id
                )));
            }
        }
        Ok(())
    }

    pub fn category(&self, id: &str) -> Option<&CategoryRule> {
        self.categories.iter().find(|r| r.id == id)
    }
}
