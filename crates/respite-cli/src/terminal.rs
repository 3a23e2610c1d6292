use std::io::Write;

use respite_core::DisplaySink;
use tracing::warn;

pub const OVERLAY_ON: &str = "=== Break time: step away from the screen ===";
pub const OVERLAY_OFF: &str = "--- Break overlay closed ---";

/// Renders the overlay and readout as lines on stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    fn line(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            warn!(error = %e, "failed to write to stdout");
        }
    }
}

impl DisplaySink for TerminalSink {
    fn set_overlay_visible(&mut self, visible: bool) {
        self.line(if visible { OVERLAY_ON } else { OVERLAY_OFF });
    }

    fn set_display_text(&mut self, text: &str) {
        self.line(text);
    }
}
