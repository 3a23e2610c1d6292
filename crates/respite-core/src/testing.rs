//! Test helpers for engine consumers.
//!
//! [`RecordingSink`] keeps every outbound signal in arrival order so tests
//! (and JSON front-ends) can inspect exactly what the engine emitted.

use crate::events::Signal;
use crate::sink::DisplaySink;

/// A [`DisplaySink`] that records every emission.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    signals: Vec<Signal>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    pub fn clear(&mut self) {
        self.signals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Overlay flags in emission order.
    pub fn overlay_changes(&self) -> Vec<bool> {
        self.signals
            .iter()
            .filter_map(|s| match s {
                Signal::OverlayVisible(v) => Some(*v),
                Signal::DisplayText(_) => None,
            })
            .collect()
    }

    /// Display strings in emission order.
    pub fn texts(&self) -> Vec<&str> {
        self.signals.iter().filter_map(Signal::text).collect()
    }

    pub fn last_text(&self) -> Option<&str> {
        self.signals.iter().rev().find_map(Signal::text)
    }
}

impl DisplaySink for RecordingSink {
    fn set_overlay_visible(&mut self, visible: bool) {
        self.signals.push(Signal::OverlayVisible(visible));
    }

    fn set_display_text(&mut self, text: &str) {
        self.signals.push(Signal::DisplayText(text.to_string()));
    }
}
