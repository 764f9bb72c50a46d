//! Arrow detection backends.
//!
//! | Kind | Backend |
//! |------|---------|
//! | `None` | `NullDetector`, never detects |
//! | `Replay` | `ReplayDetector`, recorded observations by frame index |
//!
//! Use `DetectorBuilder` to create a detector for a `DetectorKind`.

pub mod builder;
pub mod detector;
pub mod replay;

pub use builder::DetectorBuilder;
pub use detector::{ArrowDetector, NullDetector};
pub use replay::ReplayDetector;

#[cfg(test)]
pub use detector::MockArrowDetector;
