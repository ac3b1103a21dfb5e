//! Host signals and the table that routes them to connector handlers.

use serde::{Deserialize, Serialize};

use crate::connector::Connector;
use crate::layout::{LayoutProvider, RenderSink};

/// Discrete events from the host page.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// The connector's view became visible.
    Activated,
    /// The connector's view was hidden.
    Deactivated,
    Resize,
    Scroll,
}

impl Signal {
    const fn index(self) -> usize {
        match self {
            Signal::Activated => 0,
            Signal::Deactivated => 1,
            Signal::Resize => 2,
            Signal::Scroll => 3,
        }
    }

    /// Signals that end with a reveal computation.
    pub const fn reveals(self) -> bool {
        matches!(self, Signal::Activated | Signal::Resize | Signal::Scroll)
    }
}

/// Handler signature. `None` means the signal was ignored.
pub type Handler = fn(&mut Connector, &dyn LayoutProvider, &mut dyn RenderSink) -> Option<f64>;

fn on_activated(c: &mut Connector, layout: &dyn LayoutProvider, sink: &mut dyn RenderSink) -> Option<f64> {
    Some(c.activate(layout, sink))
}

fn on_deactivated(c: &mut Connector, _layout: &dyn LayoutProvider, sink: &mut dyn RenderSink) -> Option<f64> {
    if !c.is_active() {
        return None;
    }
    c.deactivate(sink);
    Some(0.0)
}

fn on_resize(c: &mut Connector, layout: &dyn LayoutProvider, sink: &mut dyn RenderSink) -> Option<f64> {
    if !c.is_active() {
        return None;
    }
    // Every size-dependent measurement may have changed.
    c.invalidate();
    Some(c.update_reveal(layout, sink))
}

fn on_scroll(c: &mut Connector, layout: &dyn LayoutProvider, sink: &mut dyn RenderSink) -> Option<f64> {
    if !c.is_active() {
        return None;
    }
    Some(c.update_reveal(layout, sink))
}

/// Signal → handler table, indexed by [`Signal`].
#[derive(Copy, Clone)]
pub struct Dispatcher {
    handlers: [Handler; 4],
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub const DEFAULT: Dispatcher = Dispatcher {
        handlers: [on_activated, on_deactivated, on_resize, on_scroll],
    };

    /// Replace the handler for one signal.
    pub fn with_handler(mut self, signal: Signal, handler: Handler) -> Self {
        self.handlers[signal.index()] = handler;
        self
    }

    pub fn dispatch(
        &self,
        connector: &mut Connector,
        signal: Signal,
        layout: &dyn LayoutProvider,
        sink: &mut dyn RenderSink,
    ) -> Option<f64> {
        (self.handlers[signal.index()])(connector, layout, sink)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Connector {
    /// Route `signal` through the default dispatch table.
    pub fn handle(
        &mut self,
        signal: Signal,
        layout: &dyn LayoutProvider,
        sink: &mut dyn RenderSink,
    ) -> Option<f64> {
        Dispatcher::DEFAULT.dispatch(self, signal, layout, sink)
    }
}

/// Coalesces bursts of signals between two frames.
///
/// Consecutive duplicates collapse into one, and a scroll queued right after
/// another reveal-producing signal is dropped since that signal already
/// computes the reveal against the newest layout.
#[derive(Clone, Debug, Default)]
pub struct SignalQueue {
    pending: Vec<Signal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: Signal) {
        if let Some(&last) = self.pending.last() {
            if last == signal || (signal == Signal::Scroll && last.reveals()) {
                return;
            }
        }
        self.pending.push(signal);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Dispatch everything queued against the current layout.
    /// Returns the last reported fraction, if any handler ran.
    pub fn flush(
        &mut self,
        dispatcher: &Dispatcher,
        connector: &mut Connector,
        layout: &dyn LayoutProvider,
        sink: &mut dyn RenderSink,
    ) -> Option<f64> {
        let mut last = None;
        for signal in self.pending.drain(..) {
            if let Some(f) = dispatcher.dispatch(connector, signal, layout, sink) {
                last = Some(f);
            }
        }
        last
    }
}
