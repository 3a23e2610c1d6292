//! Readout formatting.

use std::time::Duration;

use serde::Serialize;

/// What a front-end should currently be showing.
///
/// Derived from engine state on demand; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySnapshot {
    /// `None` while idle: there is no countdown to show.
    pub text: Option<String>,
    pub overlay_visible: bool,
}

/// Format a countdown as `M:SS`, or `H:MM:SS` from one hour up.
///
/// Sub-second remainders round up, so a countdown only reads `0:00` once
/// nothing is left.
pub fn format_countdown(remaining: Duration) -> String {
    let mut total = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        total += 1;
    }
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

pub fn format_snooze(remaining: Duration) -> String {
    format!("Snoozed {}", format_countdown(remaining))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(format_countdown(Duration::from_secs(300)), "5:00");
        assert_eq!(format_countdown(Duration::from_secs(1499)), "24:59");
        assert_eq!(format_countdown(Duration::from_secs(9)), "0:09");
        assert_eq!(format_countdown(Duration::ZERO), "0:00");
    }

    #[test]
    fn rounds_partial_seconds_up() {
        assert_eq!(format_countdown(Duration::from_millis(299_500)), "5:00");
        assert_eq!(format_countdown(Duration::from_millis(1)), "0:01");
    }

    #[test]
    fn hours_switch_format() {
        assert_eq!(format_countdown(Duration::from_secs(3599)), "59:59");
        assert_eq!(format_countdown(Duration::from_secs(3600)), "1:00:00");
        assert_eq!(format_countdown(Duration::from_secs(5025)), "1:23:45");
    }

    #[test]
    fn snooze_is_prefixed() {
        assert_eq!(format_snooze(Duration::from_secs(299)), "Snoozed 4:59");
    }
}
