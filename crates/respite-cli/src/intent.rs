//! Text form of the user intents, as typed on stdin or passed to `--at`.

use std::fmt;
use std::str::FromStr;

use respite_core::PresetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Snooze,
    Skip,
    Preset(PresetId),
    Quit,
    /// Print the engine snapshot. Not forwarded to the engine.
    Status,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseIntentError(String);

impl fmt::Display for ParseIntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseIntentError {}

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let intent = match words.next().map(str::to_ascii_lowercase).as_deref() {
            Some("snooze") => Intent::Snooze,
            Some("skip") => Intent::Skip,
            Some("quit" | "q" | "exit") => Intent::Quit,
            Some("status") => Intent::Status,
            Some("preset") => {
                let arg = words
                    .next()
                    .ok_or_else(|| ParseIntentError("usage: preset <id>".into()))?;
                let id = arg
                    .parse::<PresetId>()
                    .map_err(|_| ParseIntentError(format!("invalid preset id: {arg}")))?;
                Intent::Preset(id)
            }
            Some(other) => {
                return Err(ParseIntentError(format!(
                    "unknown command: {other} (expected snooze, skip, preset <id>, status, quit)"
                )))
            }
            None => return Err(ParseIntentError("empty command".into())),
        };
        if let Some(extra) = words.next() {
            return Err(ParseIntentError(format!("unexpected argument: {extra}")));
        }
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_intents() {
        assert_eq!("snooze".parse(), Ok(Intent::Snooze));
        assert_eq!(" Skip ".parse(), Ok(Intent::Skip));
        assert_eq!("preset 3".parse(), Ok(Intent::Preset(3)));
        assert_eq!("q".parse(), Ok(Intent::Quit));
        assert_eq!("status".parse(), Ok(Intent::Status));
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Intent>().is_err());
        assert!("preset".parse::<Intent>().is_err());
        assert!("preset -1".parse::<Intent>().is_err());
        assert!("preset one".parse::<Intent>().is_err());
        assert!("skip now".parse::<Intent>().is_err());
        assert!("pause".parse::<Intent>().is_err());
    }
}
