//! Request handlers.

pub mod analysis;
pub mod docs;
pub mod health;

pub use analysis::*;
pub use docs::*;
pub use health::*;
