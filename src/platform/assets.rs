//! Asset readiness as seen by the core
//!
//! Loading and decoding happen elsewhere; the core only learns whether the
//! sprites arrived.

use crate::sim::SpriteSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssetStatus {
    #[default]
    Loading,
    Ready(SpriteSet),
    /// Loading gave up; the game stays on hold
    Failed(String),
}

impl AssetStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetStatus::Ready(_))
    }
}
