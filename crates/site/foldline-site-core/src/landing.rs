//! Landing sequence as a precomputed cue timeline.
//!
//! The host steps the player with frame deltas and applies whatever cues were
//! crossed; nothing here sleeps or owns a timer.

use serde::{Deserialize, Serialize};

use crate::config::{LandingTimings, SiteConfig};

/// One visual change of the landing sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LandingAction {
    /// Grow the animation container.
    Expand,
    /// Append one slogan character.
    TypeChar { index: usize, ch: char },
    /// Fade the slogan wrapper out.
    HideSlogan,
    /// Shrink the container back.
    Collapse,
    OrangeMode,
    /// Fade the whole landing layer.
    FadeLanding,
    /// Remove the landing layer and mount the main page (still transparent).
    ShowMain,
    /// Main page becomes opaque and scrollable; first tab, 3D background and
    /// model preload start here.
    RevealMain,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub at_ms: f64,
    pub action: LandingAction,
}

/// Build the full cue list for `slogan` with `timings`.
pub fn build_timeline(slogan: &str, timings: &LandingTimings) -> Vec<Cue> {
    let mut cues = Vec::with_capacity(slogan.chars().count() + 7);
    let mut t = timings.expand_after_ms;
    cues.push(Cue {
        at_ms: t,
        action: LandingAction::Expand,
    });

    t += timings.typing_after_ms;
    for (index, ch) in slogan.chars().enumerate() {
        cues.push(Cue {
            at_ms: t,
            action: LandingAction::TypeChar { index, ch },
        });
        t += timings.char_ms;
    }

    let tail = [
        (timings.hide_after_ms, LandingAction::HideSlogan),
        (timings.collapse_after_ms, LandingAction::Collapse),
        (timings.orange_after_ms, LandingAction::OrangeMode),
        (timings.fade_after_ms, LandingAction::FadeLanding),
        (timings.show_main_after_ms, LandingAction::ShowMain),
        (timings.reveal_main_after_ms, LandingAction::RevealMain),
    ];
    for (delay, action) in tail {
        t += delay;
        cues.push(Cue { at_ms: t, action });
    }
    cues
}

/// Tick-driven player over a landing timeline.
#[derive(Clone, Debug)]
pub struct LandingPlayer {
    cues: Vec<Cue>,
    elapsed_ms: f64,
    next: usize,
    typed: String,
}

impl LandingPlayer {
    pub fn new(cfg: &SiteConfig) -> Self {
        Self::from_cues(build_timeline(&cfg.slogan, &cfg.landing))
    }

    pub fn from_cues(cues: Vec<Cue>) -> Self {
        Self {
            cues,
            elapsed_ms: 0.0,
            next: 0,
            typed: String::new(),
        }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Time of the final cue.
    pub fn duration_ms(&self) -> f64 {
        self.cues.last().map_or(0.0, |c| c.at_ms)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.cues.len()
    }

    /// Slogan text typed so far.
    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    /// Advance by `dt_ms` and return the cues crossed, in order.
    /// Negative or non-finite deltas are treated as zero.
    pub fn update(&mut self, dt_ms: f64) -> Vec<LandingAction> {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        }
        self.drain_due()
    }

    /// Jump to the end, returning every cue not yet fired.
    pub fn skip(&mut self) -> Vec<LandingAction> {
        self.elapsed_ms = self.elapsed_ms.max(self.duration_ms());
        self.drain_due()
    }

    fn drain_due(&mut self) -> Vec<LandingAction> {
        let mut fired = Vec::new();
        while let Some(cue) = self.cues.get(self.next) {
            if cue.at_ms > self.elapsed_ms {
                break;
            }
            if let LandingAction::TypeChar { ch, .. } = cue.action {
                self.typed.push(ch);
            }
            fired.push(cue.action.clone());
            self.next += 1;
        }
        fired
    }
}
