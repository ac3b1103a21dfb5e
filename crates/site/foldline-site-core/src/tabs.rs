//! Tab navigation.
//!
//! Showing or leaving the connector tab is what starts and stops the
//! connector line, so tab changes surface the matching connector signal.

use foldline_connector_core::Signal;
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::error::SiteError;

/// What the host has to do after a tab change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TabEffects {
    /// 1-based id of the tab now shown.
    pub active: usize,
    pub previous: Option<usize>,
    pub scroll_to_top: bool,
    /// Connector signal to dispatch once `connector_delay_ms` has passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector: Option<Signal>,
    pub connector_delay_ms: f64,
    /// Element id to scroll into view (centered) after the connector settles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_into_view: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TabBar {
    count: usize,
    connector_tab: usize,
    settle_ms: f64,
    demo_steps: usize,
    active: Option<usize>,
}

impl TabBar {
    pub fn new(cfg: &SiteConfig) -> Self {
        Self {
            count: cfg.tab_count,
            connector_tab: cfg.connector_tab,
            settle_ms: cfg.connector_settle_ms,
            demo_steps: cfg.demo_steps,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_connector_tab_active(&self) -> bool {
        self.active == Some(self.connector_tab)
    }

    /// Show tab `tab` (1-based).
    ///
    /// Re-showing the connector tab re-activates it so the path is measured
    /// against the fresh layout.
    pub fn show(&mut self, tab: usize) -> Result<TabEffects, SiteError> {
        if tab == 0 || tab > self.count {
            return Err(SiteError::InvalidTab {
                tab,
                count: self.count,
            });
        }
        let previous = self.active.replace(tab);
        let connector = if tab == self.connector_tab {
            Some(Signal::Activated)
        } else if previous == Some(self.connector_tab) {
            Some(Signal::Deactivated)
        } else {
            None
        };
        log::debug!("tab {previous:?} -> {tab} (connector: {connector:?})");
        Ok(TabEffects {
            active: tab,
            previous,
            scroll_to_top: true,
            connector,
            connector_delay_ms: if connector == Some(Signal::Activated) {
                self.settle_ms
            } else {
                0.0
            },
            scroll_into_view: None,
        })
    }

    /// Jump from an overview card to step `step` of the demo.
    pub fn go_to_demo_step(&mut self, step: usize) -> Result<TabEffects, SiteError> {
        if step == 0 || step > self.demo_steps {
            return Err(SiteError::InvalidStep {
                step,
                count: self.demo_steps,
            });
        }
        let mut effects = self.show(self.connector_tab)?;
        effects.scroll_into_view = Some(format!("demo-step-{step}"));
        Ok(effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> TabBar {
        TabBar::new(&SiteConfig::default())
    }

    #[test]
    fn first_tab_has_no_connector_effect() {
        let mut t = bar();
        let fx = t.show(1).unwrap();
        assert_eq!(fx.active, 1);
        assert_eq!(fx.previous, None);
        assert!(fx.scroll_to_top);
        assert_eq!(fx.connector, None);
    }

    #[test]
    fn entering_and_leaving_connector_tab() {
        let mut t = bar();
        t.show(1).unwrap();
        let fx = t.show(2).unwrap();
        assert_eq!(fx.connector, Some(Signal::Activated));
        assert_eq!(fx.connector_delay_ms, 100.0);
        assert!(t.is_connector_tab_active());

        let fx = t.show(3).unwrap();
        assert_eq!(fx.connector, Some(Signal::Deactivated));
        assert_eq!(fx.connector_delay_ms, 0.0);
    }

    #[test]
    fn out_of_range_tab() {
        let mut t = bar();
        assert_eq!(t.show(0), Err(SiteError::InvalidTab { tab: 0, count: 3 }));
        assert!(t.show(4).is_err());
        assert_eq!(t.active(), None);
    }

    #[test]
    fn demo_step_shortcut() {
        let mut t = bar();
        t.show(1).unwrap();
        let fx = t.go_to_demo_step(3).unwrap();
        assert_eq!(fx.active, 2);
        assert_eq!(fx.connector, Some(Signal::Activated));
        assert_eq!(fx.scroll_into_view.as_deref(), Some("demo-step-3"));
        assert!(t.go_to_demo_step(4).is_err());
    }
}
