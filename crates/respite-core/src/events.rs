use serde::{Deserialize, Serialize};

/// An outbound notification produced by the engine.
///
/// Every emission the engine makes through a [`DisplaySink`] corresponds to
/// exactly one `Signal`, which is what recording sinks and JSON front-ends
/// keep around.
///
/// [`DisplaySink`]: crate::sink::DisplaySink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Signal {
    /// Show or hide the full-screen break overlay.
    OverlayVisible(bool),
    /// Replace the timer readout.
    DisplayText(String),
}

impl Signal {
    pub fn text(&self) -> Option<&str> {
        match self {
            Signal::DisplayText(text) => Some(text),
            Signal::OverlayVisible(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&Signal::OverlayVisible(true)).unwrap();
        assert_eq!(json, r#"{"type":"overlay_visible","value":true}"#);

        let json = serde_json::to_string(&Signal::DisplayText("5:00".into())).unwrap();
        assert_eq!(json, r#"{"type":"display_text","value":"5:00"}"#);
    }

    #[test]
    fn text_only_for_display_signals() {
        assert_eq!(Signal::DisplayText("1:00".into()).text(), Some("1:00"));
        assert_eq!(Signal::OverlayVisible(false).text(), None);
    }
}
