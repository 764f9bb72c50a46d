//! Tear pattern classification types.
//!
//! The tear pattern is the shape of the hole an arrow leaves in paper:
//!
//! - `Perfect`: round hole, bow and arrow are tuned
//! - `High` / `Low`: vertical tear, usually nocking point or cam timing
//! - `Left` / `Right`: horizontal tear, usually rest position or spine
//! - `Unknown`: nothing to classify

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Classified tear pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum TearType {
    Perfect,
    High,
    Low,
    Left,
    Right,
    #[default]
    Unknown,
}

impl TearType {
    /// All tear types.
    pub const ALL: &'static [TearType] = &[
        TearType::Perfect,
        TearType::High,
        TearType::Low,
        TearType::Left,
        TearType::Right,
        TearType::Unknown,
    ];

    /// Returns the tear type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TearType::Perfect => "perfect",
            TearType::High => "high",
            TearType::Low => "low",
            TearType::Left => "left",
            TearType::Right => "right",
            TearType::Unknown => "unknown",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            TearType::Perfect => "Round hole, well tuned",
            TearType::High => "Tear above center, nock too high",
            TearType::Low => "Tear below center, nock too low",
            TearType::Left => "Tear to the left, weak spine",
            TearType::Right => "Tear to the right, stiff spine",
            TearType::Unknown => "Tear pattern could not be classified",
        }
    }

    /// True for tears on the vertical axis.
    pub fn is_vertical(&self) -> bool {
        matches!(self, TearType::High | TearType::Low)
    }

    /// True for tears on the horizontal axis.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, TearType::Left | TearType::Right)
    }
}

impl fmt::Display for TearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TearType {
    type Err = TearTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "perfect" => Ok(TearType::Perfect),
            "high" => Ok(TearType::High),
            "low" => Ok(TearType::Low),
            "left" => Ok(TearType::Left),
            "right" => Ok(TearType::Right),
            "unknown" => Ok(TearType::Unknown),
            _ => Err(TearTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown tear type: {0}")]
pub struct TearTypeParseError(String);

/// Tear type with classifier confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TearClassification {
    pub tear_type: TearType,
    pub confidence: f64,
}

impl TearClassification {
    pub fn new(tear_type: TearType, confidence: f64) -> Self {
        Self {
            tear_type,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Result for trajectories with nothing to classify.
    pub fn unknown() -> Self {
        Self {
            tear_type: TearType::Unknown,
            confidence: 0.0,
        }
    }
}
