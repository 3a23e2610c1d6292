//! Outbound side of the engine boundary.
//!
//! The engine owns one `DisplaySink` and calls it synchronously from inside
//! tick and intent handlers. Implementations must not call back into the
//! engine.

use crate::events::Signal;

/// Receiver for the engine's two outbound notifications.
pub trait DisplaySink {
    /// Show or hide the full-screen break overlay.
    fn set_overlay_visible(&mut self, visible: bool);

    /// Replace the timer readout.
    fn set_display_text(&mut self, text: &str);

    /// Dispatch a [`Signal`] to the matching method.
    fn emit(&mut self, signal: &Signal) {
        match signal {
            Signal::OverlayVisible(visible) => self.set_overlay_visible(*visible),
            Signal::DisplayText(text) => self.set_display_text(text),
        }
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn set_overlay_visible(&mut self, visible: bool) {
        (**self).set_overlay_visible(visible);
    }

    fn set_display_text(&mut self, text: &str) {
        (**self).set_display_text(text);
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn set_overlay_visible(&mut self, visible: bool) {
        (**self).set_overlay_visible(visible);
    }

    fn set_display_text(&mut self, text: &str) {
        (**self).set_display_text(text);
    }
}

/// A sink that discards everything. Useful for headless engines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn set_overlay_visible(&mut self, _visible: bool) {}

    fn set_display_text(&mut self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;

    #[test]
    fn emit_dispatches_to_methods() {
        let mut sink = RecordingSink::new();
        sink.emit(&Signal::OverlayVisible(true));
        sink.emit(&Signal::DisplayText("0:20".into()));
        assert_eq!(
            sink.signals(),
            &[
                Signal::OverlayVisible(true),
                Signal::DisplayText("0:20".into())
            ]
        );
    }

    #[test]
    fn boxed_and_borrowed_sinks_forward() {
        fn drive<S: DisplaySink>(mut sink: S) {
            sink.set_display_text("1:00");
            sink.set_overlay_visible(false);
        }

        let mut inner = RecordingSink::new();
        drive(&mut inner);
        drive(Box::new(NullSink));
        let boxed: Box<dyn DisplaySink> = Box::new(RecordingSink::new());
        drive(boxed);
        assert_eq!(inner.texts(), vec!["1:00"]);
        assert_eq!(inner.overlay_changes(), vec![false]);
    }
}
