//! AI lab: category selection, upload lifecycle and classifier verdicts.
//!
//! Inference itself happens in an external classifier; this module only
//! decides what its ranked output means for the selected category.

use serde::{Deserialize, Serialize};

use crate::config::{CategoryRule, SiteConfig};
use crate::error::SiteError;

pub const MATCH_COLOR: &str = "#00ffcc";
pub const WARNING_COLOR: &str = "#ff3366";

/// One ranked classifier output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// Top label belongs to the selected category.
    Match,
    /// Top label is something else.
    Mismatch,
    /// Classifier saw only background.
    NoObject,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub kind: VerdictKind,
    pub label: String,
    pub category: String,
    /// Confidence in percent, unrounded.
    pub confidence_pct: f64,
}

impl Verdict {
    pub fn color(&self) -> &'static str {
        match self.kind {
            VerdictKind::Match => MATCH_COLOR,
            VerdictKind::Mismatch | VerdictKind::NoObject => WARNING_COLOR,
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            VerdictKind::Match => format!("It's a {}!", self.label),
            VerdictKind::NoObject => "No Object Detected".to_string(),
            VerdictKind::Mismatch => format!(
                "Warning: Looks like {}, not a {}.",
                self.label, self.category
            ),
        }
    }

    /// One decimal, e.g. `"87.3%"`. Exact ties round up (`81.25` -> `81.3`).
    pub fn confidence_text(&self) -> String {
        let pct = self.confidence_pct;
        // Only x.25 and x.75 sit exactly on a tie; `{:.1}` would round them to even.
        let quarters = pct * 4.0;
        if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
            format!("{:.1}%", pct + 0.05)
        } else {
            format!("{pct:.1}%")
        }
    }

    /// Result bar width in percent.
    pub fn bar_width_pct(&self) -> f64 {
        self.confidence_pct.clamp(0.0, 100.0)
    }
}

/// Judge the top prediction against `rule`.
///
/// The highest-confidence entry wins; ties keep the earlier one.
pub fn evaluate(
    predictions: &[Prediction],
    rule: &CategoryRule,
    background_label: &str,
) -> Result<Verdict, SiteError> {
    let top = predictions
        .iter()
        .fold(None::<&Prediction>, |best, p| match best {
            Some(b) if b.confidence >= p.confidence => Some(b),
            _ => Some(p),
        })
        .ok_or(SiteError::NoPredictions)?;

    let kind = if rule.accepts(&top.label) {
        VerdictKind::Match
    } else if top.label == background_label {
        VerdictKind::NoObject
    } else {
        VerdictKind::Mismatch
    };
    let confidence_pct = if top.confidence.is_finite() {
        top.confidence * 100.0
    } else {
        0.0
    };
    Ok(Verdict {
        kind,
        label: top.label.clone(),
        category: rule.id.clone(),
        confidence_pct,
    })
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Loading,
    Ready,
}

/// Visible state of the lab panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum LabPhase {
    /// No category yet; upload disabled.
    ChooseCategory,
    /// Category chosen; placeholder shown, upload enabled.
    AwaitingUpload,
    /// Image shown with spinner.
    Classifying,
    Result { verdict: Verdict },
}

#[derive(Clone, Debug)]
pub struct AiLab {
    rules: Vec<CategoryRule>,
    background_label: String,
    category: Option<usize>,
    model: ModelStatus,
    phase: LabPhase,
}

impl AiLab {
    pub fn new(cfg: &SiteConfig) -> Self {
        Self {
            rules: cfg.categories.clone(),
            background_label: cfg.background_label.clone(),
            category: None,
            model: ModelStatus::Loading,
            phase: LabPhase::ChooseCategory,
        }
    }

    pub fn phase(&self) -> &LabPhase {
        &self.phase
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model
    }

    pub fn category(&self) -> Option<&str> {
        self.category.map(|i| self.rules[i].id.as_str())
    }

    pub fn upload_enabled(&self) -> bool {
        self.category.is_some()
    }

    pub fn mark_model_ready(&mut self) {
        log::info!("classifier model ready");
        self.model = ModelStatus::Ready;
    }

    /// Select a category and return its guide text. Clears any previous
    /// preview or result.
    pub fn select_category(&mut self, id: &str) -> Result<&str, SiteError> {
        let idx = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| SiteError::UnknownCategory(id.to_string()))?;
        self.category = Some(idx);
        self.phase = LabPhase::AwaitingUpload;
        Ok(&self.rules[idx].guide)
    }

    /// An image was read; show it with the spinner.
    pub fn begin_upload(&mut self) -> Result<(), SiteError> {
        if self.category.is_none() {
            return Err(SiteError::NoCategory);
        }
        self.phase = LabPhase::Classifying;
        Ok(())
    }

    /// Apply classifier output for the current upload.
    pub fn classify(&mut self, predictions: &[Prediction]) -> Result<Verdict, SiteError> {
        if self.model != ModelStatus::Ready {
            return Err(SiteError::ModelNotReady);
        }
        let idx = self.category.ok_or(SiteError::NoCategory)?;
        let verdict = evaluate(predictions, &self.rules[idx], &self.background_label)?;
        log::debug!("verdict {:?} for '{}'", verdict.kind, verdict.label);
        self.phase = LabPhase::Result {
            verdict: verdict.clone(),
        };
        Ok(verdict)
    }

    /// Classifier reported an error: hide the spinner, keep the preview.
    pub fn classification_failed(&mut self, message: &str) {
        log::error!("classification failed: {message}");
        if self.phase == LabPhase::Classifying {
            self.phase = LabPhase::AwaitingUpload;
        }
    }
}
