//! Detector backend selection.
//!
//! - `None`: placeholder backend, never reports an arrow
//! - `Replay`: serves detections recorded by an external model

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which arrow detector implementation a pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    /// No detection. Every frame reports "no arrow".
    #[default]
    None,

    /// Pre-recorded observations keyed by frame index.
    Replay,
}

impl DetectorKind {
    /// All available detector kinds.
    pub const ALL: &'static [DetectorKind] = &[DetectorKind::None, DetectorKind::Replay];

    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorKind::None => "none",
            DetectorKind::Replay => "replay",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            DetectorKind::None => "Placeholder detector (no detections)",
            DetectorKind::Replay => "Replay of recorded detections",
        }
    }

    /// Returns true if this kind needs a detections file.
    pub fn requires_detections(&self) -> bool {
        matches!(self, DetectorKind::Replay)
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DetectorKind {
    type Err = DetectorKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "null" => Ok(DetectorKind::None),
            "replay" | "recorded" => Ok(DetectorKind::Replay),
            _ => Err(DetectorKindParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown detector kind: {0}")]
pub struct DetectorKindParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("none".parse::<DetectorKind>().unwrap(), DetectorKind::None);
        assert_eq!("null".parse::<DetectorKind>().unwrap(), DetectorKind::None);
        assert_eq!("Replay".parse::<DetectorKind>().unwrap(), DetectorKind::Replay);
        assert!("yolo".parse::<DetectorKind>().is_err());
    }

    #[test]
    fn test_kind_requirements() {
        assert!(!DetectorKind::None.requires_detections());
        assert!(DetectorKind::Replay.requires_detections());
        assert_eq!(DetectorKind::default(), DetectorKind::None);
    }
}
